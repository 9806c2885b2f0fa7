//! Domain models shared by the store, the token service and the API layer.

pub mod auth;
pub mod profile;
