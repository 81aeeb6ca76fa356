use sea_orm::ConnectionTrait;

use crate::server::{
    data::user::UserRepository,
    error::auth::AuthError,
    model::user::{AccountStatus, User},
};

pub enum Permission {
    Admin,
}

/// Answers "may this caller do that" from the mirrored user's role.
///
/// Admin rights need both the admin role and an active account; a suspended or pending
/// admin is denied like a student.
///
/// The caller id comes from the identity service that authenticated the request; the
/// guard only resolves it to a local user and checks the requested permissions.
pub struct AuthGuard<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuthGuard<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn require(
        &self,
        user_id: i32,
        permissions: &[Permission],
    ) -> Result<User, AuthError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id));
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.is_admin() {
                        return Err(AuthError::AccessDenied(
                            user_id,
                            "User attempted an admin-only lending action without the admin role"
                                .to_string(),
                        ));
                    }
                    if user.account_status != AccountStatus::Active {
                        return Err(AuthError::AccessDenied(
                            user_id,
                            format!(
                                "Admin attempted an admin-only lending action while {}",
                                user.account_status.as_str()
                            ),
                        ));
                    }
                }
            }
        }

        Ok(user)
    }
}

