//! User profile request handlers.

use axum::extract::State;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;
use crate::models::{MeResponse, StaffProfileResponse};
use crate::services::users;

/// `GET /api/users/me` — profile of the authenticated caller.
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<MeResponse>> {
    let resp = users::me(state.accounts.as_ref(), &user.0).await?;
    Ok(Json(resp))
}

/// `GET /api/users/staffs` — staff directory. Admin only.
pub async fn list_staff_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StaffProfileResponse>>> {
    let resp = users::list_staff(state.accounts.as_ref()).await?;
    Ok(Json(resp))
}
