//! Profile lookups for the current user and the staff directory.

use sanatory_core::models::auth::{Credential, Role};
use sanatory_core::store::AccountStore;

use crate::error::{AppError, AppResult};
use crate::models::{MeResponse, ParentProfileResponse, StaffProfileResponse};

/// Profile of the authenticated caller, shaped by the role on the loaded record.
pub async fn me(accounts: &dyn AccountStore, credential: &Credential) -> AppResult<MeResponse> {
    match credential.role {
        Role::User => {
            let parent = accounts
                .find_parent_by_user(credential.id)
                .await?
                .ok_or_else(|| AppError::NotFound("parent profile".into()))?;
            Ok(MeResponse::Parent(ParentProfileResponse::new(
                credential, parent,
            )))
        }
        Role::Admin => {
            let staff = accounts
                .find_staff_by_user(credential.id)
                .await?
                .ok_or_else(|| AppError::NotFound("staff profile".into()))?;
            Ok(MeResponse::Staff(StaffProfileResponse::new(credential, staff)))
        }
    }
}

/// All staff profiles with their login identity.
pub async fn list_staff(accounts: &dyn AccountStore) -> AppResult<Vec<StaffProfileResponse>> {
    let staff = accounts.list_staff().await?;
    let mut out = Vec::with_capacity(staff.len());
    for member in staff {
        // Profiles whose credential vanished mid-listing are skipped.
        if let Some(credential) = accounts.find_by_id(member.id_user).await? {
            out.push(StaffProfileResponse::new(&credential, member));
        }
    }
    Ok(out)
}
