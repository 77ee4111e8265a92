//! Profile records and the store abstraction the gate talks to

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::error::AppResult;

/// What the bot remembers about one user, keyed by the Telegram user id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Present once the user shared their own contact
    #[serde(default)]
    pub phone: Option<String>,
    /// Sender's first name at the time the contact was shared
    #[serde(default)]
    pub first_name: Option<String>,
    /// Sender's @handle at the time the contact was shared
    #[serde(default)]
    pub username: Option<String>,
}

impl ProfileRecord {
    pub fn new(phone: impl Into<String>, first_name: Option<String>, username: Option<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            first_name,
            username,
        }
    }

    /// The only signal the gate looks at
    pub fn has_phone(&self) -> bool {
        self.phone.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

/// Whole mapping of user id (decimal string) to record, as persisted
pub type UserRecords = BTreeMap<String, ProfileRecord>;

/// Durable user-record storage.
///
/// `load`/`save` always move the whole mapping. Implementations must make
/// `upsert` a single atomic load-mutate-save so concurrent handlers never
/// drop each other's writes.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Full mapping; empty when nothing was stored yet
    async fn load(&self) -> AppResult<UserRecords>;

    /// Replaces the whole mapping
    async fn save(&self, records: &UserRecords) -> AppResult<()>;

    /// Inserts or overwrites one user's record
    async fn upsert(&self, user_id: &str, record: ProfileRecord) -> AppResult<()>;

    async fn get(&self, user_id: &str) -> AppResult<Option<ProfileRecord>> {
        Ok(self.load().await?.remove(user_id))
    }

    async fn is_registered(&self, user_id: &str) -> AppResult<bool> {
        Ok(self.get(user_id).await?.is_some_and(|r| r.has_phone()))
    }
}
