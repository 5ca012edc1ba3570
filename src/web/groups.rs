use axum::{extract::State, Json};

use super::error::ApiError;
use crate::db::models::Group;
use crate::db::Registry;
use crate::logic::groups::GroupsService;

#[tracing::instrument(skip_all)]
pub async fn list_groups(State(registry): State<Registry>) -> Result<Json<Vec<Group>>, ApiError> {
    let groups = GroupsService::new(registry).get_all_groups().await?;
    Ok(Json(groups))
}

#[tracing::instrument(skip_all, fields(group_id = tracing::field::Empty))]
pub async fn create_group(
    State(registry): State<Registry>,
    Json(group): Json<Group>,
) -> Result<Json<Group>, ApiError> {
    tracing::Span::current().record("group_id", tracing::field::display(&group.id));
    let group = GroupsService::new(registry).create_group(group).await?;
    Ok(Json(group))
}
