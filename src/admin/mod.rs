mod password;
mod provisioning;
mod store;

pub use password::hash_password;
pub use provisioning::{
    provision_admin, provisioning_enabled, provisioning_enabled_from_env, ProvisionError,
    ProvisionOutcome, PROVISION_ENV_VAR,
};
pub use store::{AdminAccount, SqliteAdminStore};
