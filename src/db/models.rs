use std::{fmt::Display, ops::Deref};

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(sqlx::Type, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[sqlx(transparent)]
pub struct UserId(pub Uuid);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for UserId {
    type Target = Uuid;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

#[derive(sqlx::Type, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[sqlx(transparent)]
pub struct GroupId(pub Uuid);

impl GroupId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for GroupId {
    type Target = Uuid;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A row of the `groupe` table, without its members.
#[derive(Serialize, Deserialize, Clone, Debug, FromRow)]
pub struct GroupRow {
    pub id: GroupId,
    pub name: String,
}

/// A group together with its member ids, in insertion order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Group {
    #[serde(default = "GroupId::new_v4")]
    pub id: GroupId,
    pub name: String,
    pub user_ids: Vec<UserId>,
}

impl Group {
    pub fn from_row(row: GroupRow, user_ids: Vec<UserId>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            user_ids,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, FromRow)]
pub struct User {
    pub id: UserId,
    pub login: String,
}
