use fake::{faker::internet::en::Username, Fake};
use sqlx::PgPool;

use uuid::Uuid;
use watch_our_movies::db::models::UserId;

pub struct Generator {
    pub pool: PgPool,
}

pub struct MockUser {
    pub id: UserId,
}

impl Generator {
    pub async fn generate_user(&mut self) -> MockUser {
        let id = Uuid::new_v4();
        let username: String = Username().fake();
        let login = format!("{username}-{id}");

        sqlx::query("INSERT INTO users (id, login) VALUES ($1, $2)")
            .bind(id)
            .bind(&login)
            .execute(&self.pool)
            .await
            .unwrap();

        MockUser { id: id.into() }
    }

    pub async fn count_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}
