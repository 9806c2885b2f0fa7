//! Credential and profile persistence.
//!
//! The token service only needs [`CredentialStore`]; the signup and
//! profile endpoints use the wider [`AccountStore`]. Both are implemented
//! by [`PgStore`] (PostgreSQL via `sqlx`) and [`MemoryStore`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::auth::{Credential, NewCredential};
use crate::models::profile::{NewParent, NewStaff, Parent, Staff};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors raised by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Lookup and creation of login identities.
///
/// Implementations must keep `email` unique and make each call atomic.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Credential>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Credential>>;

    async fn insert(&self, credential: NewCredential) -> StoreResult<Credential>;
}

/// Credential store extended with the profile records created at signup.
#[async_trait]
pub trait AccountStore: CredentialStore {
    /// Create a USER credential and its guardian profile in one unit.
    async fn create_parent_account(
        &self,
        credential: NewCredential,
        parent: NewParent,
    ) -> StoreResult<(Credential, Parent)>;

    /// Create an ADMIN credential and its staff profile in one unit.
    async fn create_staff_account(
        &self,
        credential: NewCredential,
        staff: NewStaff,
    ) -> StoreResult<(Credential, Staff)>;

    async fn find_parent_by_user(&self, user_id: i64) -> StoreResult<Option<Parent>>;

    async fn find_staff_by_user(&self, user_id: i64) -> StoreResult<Option<Staff>>;

    async fn list_staff(&self) -> StoreResult<Vec<Staff>>;
}
