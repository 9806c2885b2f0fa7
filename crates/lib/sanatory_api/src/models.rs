//! Request and response bodies.
//!
//! Responses are built field by field from domain records; nothing here
//! is a pass-through of a store row.

use chrono::NaiveDate;
use sanatory_core::models::auth::{Credential, TokenPair};
use sanatory_core::models::profile::{NewParent, NewStaff, Parent, Staff};
use serde::{Deserialize, Serialize};

/// Error body: `{"status": <code>, "message": <text>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

/// Generic `{"status": "success"}` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// `POST /api/auth/login` form fields.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/signup/parent` body.
#[derive(Debug, Clone, Deserialize)]
pub struct ParentSignupRequest {
    pub email: String,
    pub password: String,
    pub parent: NewParent,
}

/// `POST /api/auth/signup/staff` body.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffSignupRequest {
    pub email: String,
    pub password: String,
    pub staff: NewStaff,
}

/// Access token body returned by login, signup and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires: i64,
}

impl From<&TokenPair> for TokenResponse {
    fn from(pair: &TokenPair) -> Self {
        Self {
            access_token: pair.access_token.clone(),
            token_type: "bearer".to_string(),
            expires: pair.expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
}

impl From<&Credential> for UserSummary {
    fn from(c: &Credential) -> Self {
        Self {
            id: c.id,
            email: c.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentProfileResponse {
    pub id: i64,
    pub user: UserSummary,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub passport_data: String,
}

impl ParentProfileResponse {
    pub fn new(credential: &Credential, parent: Parent) -> Self {
        Self {
            id: parent.id,
            user: UserSummary::from(credential),
            name: parent.name,
            phone: parent.phone,
            address: parent.address,
            passport_data: parent.passport_data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffProfileResponse {
    pub id: i64,
    pub user: UserSummary,
    pub name: String,
    pub position: String,
    pub qualification: String,
    pub hire_date: NaiveDate,
    pub department: String,
    pub schedule: String,
}

impl StaffProfileResponse {
    pub fn new(credential: &Credential, staff: Staff) -> Self {
        Self {
            id: staff.id,
            user: UserSummary::from(credential),
            name: staff.name,
            position: staff.position,
            qualification: staff.qualification,
            hire_date: staff.hire_date,
            department: staff.department,
            schedule: staff.schedule,
        }
    }
}

/// `GET /api/users/me` body; shape depends on the caller's role.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MeResponse {
    Parent(ParentProfileResponse),
    Staff(StaffProfileResponse),
}
