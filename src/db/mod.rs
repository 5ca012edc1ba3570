pub mod models;

use std::ops::Deref;

use models::{GroupId, GroupRow, User, UserId};
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, Transaction};

use crate::configuration::DatabaseSettings;

#[derive(Clone)]
pub struct Registry {
    pool: PgPool,
}

impl Registry {
    pub async fn new(settings: &DatabaseSettings) -> sqlx::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(settings.with_db())
            .await?;
        Ok(Registry { pool })
    }
    pub async fn begin(&self) -> sqlx::Result<RegistryTx> {
        Ok(RegistryTx {
            tx: self.pool.begin().await?,
        })
    }
}

/// Dropping a `RegistryTx` without calling [`RegistryTx::commit`] rolls back
/// everything written through it.
pub struct RegistryTx<'c> {
    tx: Transaction<'c, Postgres>,
}

impl RegistryTx<'_> {
    pub async fn commit(self) -> sqlx::Result<()> {
        self.tx.commit().await
    }

    pub async fn get_groups(&mut self) -> sqlx::Result<Vec<GroupRow>> {
        sqlx::query_as("SELECT id, name FROM groupe ORDER BY name ASC, id ASC")
            .fetch_all(&mut *self.tx)
            .await
    }

    pub async fn get_group_user_ids(&mut self, group_id: &GroupId) -> sqlx::Result<Vec<UserId>> {
        sqlx::query_scalar("SELECT user_id FROM group_user WHERE group_id = $1 ORDER BY id ASC")
            .bind(group_id.deref())
            .fetch_all(&mut *self.tx)
            .await
    }

    pub async fn get_user_by_id(&mut self, user_id: &UserId) -> sqlx::Result<Option<User>> {
        sqlx::query_as("SELECT id, login FROM users WHERE id = $1")
            .bind(user_id.deref())
            .fetch_optional(&mut *self.tx)
            .await
    }

    pub async fn add_group(&mut self, group_id: &GroupId, name: &str) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO groupe (id, name) VALUES ($1, $2)")
            .bind(group_id.deref())
            .bind(name)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    pub async fn add_group_user(
        &mut self,
        group_id: &GroupId,
        user_id: &UserId,
    ) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO group_user (group_id, user_id) VALUES ($1, $2)")
            .bind(group_id.deref())
            .bind(user_id.deref())
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }
}

pub async fn run_migrations(settings: &DatabaseSettings) -> anyhow::Result<()> {
    let pool = PgPool::connect_with(settings.with_db()).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(())
}
