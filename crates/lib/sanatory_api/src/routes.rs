//! Route paths.

pub const POST_AUTH_SIGNUP_PARENT: &str = "/api/auth/signup/parent";
pub const POST_AUTH_SIGNUP_STAFF: &str = "/api/auth/signup/staff";
pub const POST_AUTH_LOGIN: &str = "/api/auth/login";
pub const GET_AUTH_REFRESH: &str = "/api/auth/refresh";
pub const GET_AUTH_LOGOUT: &str = "/api/auth/logout";
pub const GET_USERS_ME: &str = "/api/users/me";
pub const GET_USERS_STAFFS: &str = "/api/users/staffs";
