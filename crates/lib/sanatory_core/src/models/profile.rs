//! Guardian and staff profiles attached to a credential.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Guardian (parent) profile, owned by a USER credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    pub id: i64,
    pub id_user: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub passport_data: String,
}

/// Guardian profile fields supplied at signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParent {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub passport_data: String,
}

/// Staff profile, owned by an ADMIN credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: i64,
    pub id_user: i64,
    pub name: String,
    pub position: String,
    pub qualification: String,
    pub hire_date: NaiveDate,
    pub department: String,
    pub schedule: String,
}

/// Staff profile fields supplied at signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStaff {
    pub name: String,
    pub position: String,
    pub qualification: String,
    pub hire_date: NaiveDate,
    pub department: String,
    pub schedule: String,
}
