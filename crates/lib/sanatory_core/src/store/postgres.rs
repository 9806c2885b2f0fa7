//! PostgreSQL-backed store.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

use super::{AccountStore, CredentialStore, StoreError, StoreResult};
use crate::models::auth::{Credential, NewCredential, Role};
use crate::models::profile::{NewParent, NewStaff, Parent, Staff};

type CredentialRow = (i64, String, String, String);
type StaffRow = (i64, i64, String, String, String, NaiveDate, String, String);

/// Store over a `sqlx` PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn credential_from_row((id, role, email, password_hash): CredentialRow) -> StoreResult<Credential> {
    let role = role
        .parse::<Role>()
        .map_err(|e| StoreError::Corrupt(format!("user {id}: {e}")))?;
    Ok(Credential {
        id,
        role,
        email,
        password_hash,
    })
}

fn staff_from_row(
    (id, id_user, name, position, qualification, hire_date, department, schedule): StaffRow,
) -> Staff {
    Staff {
        id,
        id_user,
        name,
        position,
        qualification,
        hire_date,
        department,
        schedule,
    }
}

/// Map unique-constraint violations on `users.email` to `DuplicateEmail`.
fn map_insert_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
        _ => StoreError::Sql(e),
    }
}

async fn insert_credential(
    conn: &mut PgConnection,
    credential: &NewCredential,
) -> StoreResult<Credential> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (role, email, password) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(credential.role.as_str())
    .bind(&credential.email)
    .bind(&credential.password_hash)
    .fetch_one(conn)
    .await
    .map_err(map_insert_error)?;

    Ok(Credential {
        id,
        role: credential.role,
        email: credential.email.clone(),
        password_hash: credential.password_hash.clone(),
    })
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, role, email, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(credential_from_row).transpose()
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, role, email, password FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(credential_from_row).transpose()
    }

    async fn insert(&self, credential: NewCredential) -> StoreResult<Credential> {
        let mut conn = self.pool.acquire().await?;
        insert_credential(&mut conn, &credential).await
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn create_parent_account(
        &self,
        credential: NewCredential,
        parent: NewParent,
    ) -> StoreResult<(Credential, Parent)> {
        let mut tx = self.pool.begin().await?;
        let created = insert_credential(&mut tx, &credential).await?;

        let parent_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO parents (id_user, name, phone, address, passport_data) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(created.id)
        .bind(&parent.name)
        .bind(&parent.phone)
        .bind(&parent.address)
        .bind(&parent.passport_data)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let NewParent {
            name,
            phone,
            address,
            passport_data,
        } = parent;
        let parent = Parent {
            id: parent_id,
            id_user: created.id,
            name,
            phone,
            address,
            passport_data,
        };
        Ok((created, parent))
    }

    async fn create_staff_account(
        &self,
        credential: NewCredential,
        staff: NewStaff,
    ) -> StoreResult<(Credential, Staff)> {
        let mut tx = self.pool.begin().await?;
        let created = insert_credential(&mut tx, &credential).await?;

        let staff_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO staff (id_user, name, position, qualification, hire_date, department, schedule) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(created.id)
        .bind(&staff.name)
        .bind(&staff.position)
        .bind(&staff.qualification)
        .bind(staff.hire_date)
        .bind(&staff.department)
        .bind(&staff.schedule)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let NewStaff {
            name,
            position,
            qualification,
            hire_date,
            department,
            schedule,
        } = staff;
        let staff = Staff {
            id: staff_id,
            id_user: created.id,
            name,
            position,
            qualification,
            hire_date,
            department,
            schedule,
        };
        Ok((created, staff))
    }

    async fn find_parent_by_user(&self, user_id: i64) -> StoreResult<Option<Parent>> {
        let row = sqlx::query_as::<_, (i64, i64, String, String, String, String)>(
            "SELECT id, id_user, name, phone, address, passport_data \
             FROM parents WHERE id_user = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(
            |(id, id_user, name, phone, address, passport_data)| Parent {
                id,
                id_user,
                name,
                phone,
                address,
                passport_data,
            },
        ))
    }

    async fn find_staff_by_user(&self, user_id: i64) -> StoreResult<Option<Staff>> {
        let row = sqlx::query_as::<_, StaffRow>(
            "SELECT id, id_user, name, position, qualification, hire_date, department, schedule \
             FROM staff WHERE id_user = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(staff_from_row))
    }

    async fn list_staff(&self) -> StoreResult<Vec<Staff>> {
        let rows = sqlx::query_as::<_, StaffRow>(
            "SELECT id, id_user, name, position, qualification, hire_date, department, schedule \
             FROM staff ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(staff_from_row).collect())
    }
}
