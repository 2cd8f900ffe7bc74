use super::password::hash_password;
use super::store::SqliteAdminStore;
use thiserror::Error;
use tracing::{info, warn};

/// Provisioning only runs when this variable is set to `1` or `true`.
pub const PROVISION_ENV_VAR: &str = "CATALOG_PROVISION_ADMIN";

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Admin provisioning is disabled, set {} to enable it", PROVISION_ENV_VAR)]
    Disabled,

    #[error("Invalid admin credentials: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub fn provisioning_enabled(env_value: Option<&str>) -> bool {
    matches!(
        env_value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1") | Some("true")
    )
}

pub fn provisioning_enabled_from_env() -> bool {
    provisioning_enabled(std::env::var(PROVISION_ENV_VAR).ok().as_deref())
}

/// Creates the admin account if no account with `username` exists yet.
/// Running it again with the same username leaves the stored password alone.
pub fn provision_admin(
    store: &SqliteAdminStore,
    username: &str,
    password: &str,
    enabled: bool,
) -> Result<ProvisionOutcome, ProvisionError> {
    if !enabled {
        warn!("Refusing to provision admin {:?}: {} not set", username, PROVISION_ENV_VAR);
        return Err(ProvisionError::Disabled);
    }

    let username = username.trim();
    if username.is_empty() {
        return Err(ProvisionError::InvalidInput(
            "username may not be blank".to_string(),
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ProvisionError::InvalidInput(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    if store.get_admin(username)?.is_some() {
        info!("Admin {:?} already exists", username);
        return Ok(ProvisionOutcome::AlreadyExists);
    }

    let password_hash = hash_password(password)?;
    if store.insert_admin_if_absent(username, &password_hash)? {
        info!("Provisioned admin {:?}", username);
        Ok(ProvisionOutcome::Created)
    } else {
        Ok(ProvisionOutcome::AlreadyExists)
    }
}
