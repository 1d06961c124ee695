//! Database layer (Firestore, or in-memory for local development).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{Quest, User};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const QUESTS: &str = "quests";
}

/// Document store operations used by the route handlers.
///
/// There are no transactions: read-modify-write callers can race.
#[async_trait]
pub trait Database: Send + Sync {
    /// All users, in no particular order.
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Store a new user. Fails if the document ID already exists.
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    /// Overwrite an existing user document.
    async fn update_user(&self, user: &User) -> Result<(), AppError>;

    async fn insert_quest(&self, quest: &Quest) -> Result<(), AppError>;
}
