use crate::errors::{AppError, AppResult};
use crate::models::{AppSettings, ViewState};

/// Checks the fixed credential pair and returns a logged-in view state.
/// The gate is intentionally a single local check; there is no account
/// backend behind it.
pub fn authenticate(settings: &AppSettings, username: &str, password: &str) -> AppResult<ViewState> {
    if username == settings.login_username && password == settings.login_password {
        tracing::info!(user = %username, "session opened");
        Ok(ViewState::default().with_login(true))
    } else {
        tracing::warn!(user = %username, "rejected login attempt");
        Err(AppError::AuthFailed(
            "invalid username or password".to_string(),
        ))
    }
}

pub fn logout() -> ViewState {
    ViewState::default()
}
