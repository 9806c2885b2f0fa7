//! Process-local store with the same semantics as [`super::PgStore`].
//!
//! Used by tests and local demos; nothing survives a restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AccountStore, CredentialStore, StoreError, StoreResult};
use crate::models::auth::{Credential, NewCredential};
use crate::models::profile::{NewParent, NewStaff, Parent, Staff};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<Credential>,
    parents: Vec<Parent>,
    staff: Vec<Staff>,
    next_user_id: i64,
    next_parent_id: i64,
    next_staff_id: i64,
}

impl Tables {
    fn insert_user(&mut self, credential: NewCredential) -> StoreResult<Credential> {
        if self.users.iter().any(|u| u.email == credential.email) {
            return Err(StoreError::DuplicateEmail);
        }
        self.next_user_id += 1;
        let created = Credential {
            id: self.next_user_id,
            role: credential.role,
            email: credential.email,
            password_hash: credential.password_hash,
        };
        self.users.push(created.clone());
        Ok(created)
    }
}

/// In-memory [`AccountStore`] guarded by a single `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete a credential and its profiles. Returns whether it existed.
    pub async fn remove_credential(&self, id: i64) -> bool {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        tables.parents.retain(|p| p.id_user != id);
        tables.staff.retain(|s| s.id_user != id);
        tables.users.len() != before
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Credential>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Credential>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, credential: NewCredential) -> StoreResult<Credential> {
        self.tables.write().await.insert_user(credential)
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_parent_account(
        &self,
        credential: NewCredential,
        parent: NewParent,
    ) -> StoreResult<(Credential, Parent)> {
        let mut tables = self.tables.write().await;
        let created = tables.insert_user(credential)?;
        tables.next_parent_id += 1;
        let parent = Parent {
            id: tables.next_parent_id,
            id_user: created.id,
            name: parent.name,
            phone: parent.phone,
            address: parent.address,
            passport_data: parent.passport_data,
        };
        tables.parents.push(parent.clone());
        Ok((created, parent))
    }

    async fn create_staff_account(
        &self,
        credential: NewCredential,
        staff: NewStaff,
    ) -> StoreResult<(Credential, Staff)> {
        let mut tables = self.tables.write().await;
        let created = tables.insert_user(credential)?;
        tables.next_staff_id += 1;
        let staff = Staff {
            id: tables.next_staff_id,
            id_user: created.id,
            name: staff.name,
            position: staff.position,
            qualification: staff.qualification,
            hire_date: staff.hire_date,
            department: staff.department,
            schedule: staff.schedule,
        };
        tables.staff.push(staff.clone());
        Ok((created, staff))
    }

    async fn find_parent_by_user(&self, user_id: i64) -> StoreResult<Option<Parent>> {
        let tables = self.tables.read().await;
        Ok(tables.parents.iter().find(|p| p.id_user == user_id).cloned())
    }

    async fn find_staff_by_user(&self, user_id: i64) -> StoreResult<Option<Staff>> {
        let tables = self.tables.read().await;
        Ok(tables.staff.iter().find(|s| s.id_user == user_id).cloned())
    }

    async fn list_staff(&self) -> StoreResult<Vec<Staff>> {
        Ok(self.tables.read().await.staff.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::auth::Role;

    fn new_credential(email: &str, role: Role) -> NewCredential {
        NewCredential {
            role,
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let a = store.insert(new_credential("a@x.io", Role::User)).await.unwrap();
        let b = store.insert(new_credential("b@x.io", Role::Admin)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.find_by_id(2).await.unwrap(), Some(b));
        assert_eq!(store.find_by_email("a@x.io").await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        store.insert(new_credential("a@x.io", Role::User)).await.unwrap();
        let err = store
            .insert(new_credential("a@x.io", Role::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn failed_parent_account_creates_nothing() {
        let store = MemoryStore::new();
        store.insert(new_credential("a@x.io", Role::User)).await.unwrap();
        let parent = NewParent {
            name: "Anna".into(),
            phone: "+100".into(),
            address: "Main st".into(),
            passport_data: "1234".into(),
        };
        assert!(store
            .create_parent_account(new_credential("a@x.io", Role::User), parent)
            .await
            .is_err());
        assert!(store.find_parent_by_user(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn staff_account_is_listed_and_removable() {
        let store = MemoryStore::new();
        let staff = NewStaff {
            name: "Dr. Who".into(),
            position: "Pediatrician".into(),
            qualification: "MD".into(),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            department: "Therapy".into(),
            schedule: "Mon-Fri".into(),
        };
        let (cred, created) = store
            .create_staff_account(new_credential("doc@example.com", Role::Admin), staff)
            .await
            .unwrap();
        assert_eq!(created.id_user, cred.id);
        assert_eq!(store.list_staff().await.unwrap(), vec![created.clone()]);
        assert_eq!(store.find_staff_by_user(cred.id).await.unwrap(), Some(created));

        assert!(store.remove_credential(cred.id).await);
        assert!(store.find_by_id(cred.id).await.unwrap().is_none());
        assert!(store.list_staff().await.unwrap().is_empty());
        assert!(!store.remove_credential(cred.id).await);
    }
}
