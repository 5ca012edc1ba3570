use watch_our_movies::{db::Registry, logic::groups::GroupsService};

use super::{configure_db, gen::Generator, setup_settings};

pub async fn create_service() -> (Generator, GroupsService) {
    let configuration = setup_settings();
    let pool = configure_db(&configuration.database).await;
    (
        Generator { pool },
        GroupsService::new(Registry::new(&configuration.database).await.unwrap()),
    )
}
