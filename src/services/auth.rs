//! Administrator sign-in and session checks.

use validator::Validate;

use crate::api::Authenticator;
use crate::api::credentials::SessionCredentials;
use crate::api::errors::ApiError;
use crate::forms::FormError;
use crate::forms::auth::LoginForm;
use crate::services::{ServiceError, ServiceResult};

/// Signs in and keeps the issued token for later requests.
pub async fn login<A>(api: &A, session: &SessionCredentials, form: LoginForm) -> ServiceResult<()>
where
    A: Authenticator + ?Sized,
{
    form.validate().map_err(FormError::from)?;
    let username = form.username.trim();

    match api.login(username, &form.password).await {
        Ok(token) => {
            session.store(token);
            log::info!("Administrator {username} signed in");
            Ok(())
        }
        Err(e) => {
            session.clear();
            log::warn!("Sign-in of {username} failed: {e}");
            match e {
                ApiError::Unauthorized | ApiError::Validation(_) => Err(ServiceError::Unauthorized),
                other => Err(other.into()),
            }
        }
    }
}

/// Asks the server whether the stored token is still accepted. A rejected
/// token is dropped so the next screen asks for a login.
pub async fn verify_session<A>(api: &A, session: &SessionCredentials) -> ServiceResult<bool>
where
    A: Authenticator + ?Sized,
{
    if !session.is_authenticated() {
        return Ok(false);
    }

    match api.verify().await {
        Ok(true) => Ok(true),
        Ok(false) | Err(ApiError::Unauthorized) => {
            log::info!("Session token rejected, signing out");
            session.clear();
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn logout(session: &SessionCredentials) {
    session.clear();
}
