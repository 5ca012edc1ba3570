use thiserror::Error;
use tracing::info;

use crate::db::{
    models::{Group, UserId},
    Registry,
};

#[derive(Error, Debug)]
pub enum GroupError {
    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("User {0} does not exist")]
    UnknownUser(UserId),
}

#[derive(Clone)]
pub struct GroupsService {
    registry: Registry,
}

impl GroupsService {
    pub fn new(registry: Registry) -> Self {
        GroupsService { registry }
    }

    pub async fn get_all_groups(&self) -> Result<Vec<Group>, GroupError> {
        let mut tx = self.registry.begin().await?;
        let rows = tx.get_groups().await?;

        let mut groups = Vec::with_capacity(rows.len());
        for row in rows {
            let user_ids = tx.get_group_user_ids(&row.id).await?;
            groups.push(Group::from_row(row, user_ids));
        }
        tx.commit().await?;
        Ok(groups)
    }

    /// Stores the group and its memberships. Every member must already exist,
    /// otherwise nothing is written.
    pub async fn create_group(&self, group: Group) -> Result<Group, GroupError> {
        let mut tx = self.registry.begin().await?;

        for user_id in &group.user_ids {
            if tx.get_user_by_id(user_id).await?.is_none() {
                return Err(GroupError::UnknownUser(*user_id));
            }
        }

        tx.add_group(&group.id, &group.name).await?;
        for user_id in &group.user_ids {
            tx.add_group_user(&group.id, user_id).await?;
        }
        tx.commit().await?;

        info!(group_id = %group.id, members = group.user_ids.len(), "Group created");
        Ok(group)
    }
}
