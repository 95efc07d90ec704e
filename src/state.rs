use crate::auth::Role;
use crate::config;
use crate::models::{Account, AccountDirectory, Company, Employee};
use crate::store::Store;

/// Shared application state. Built once at startup; the only mutation after
/// that is record contents inside the stores.
#[derive(Clone)]
pub struct AppState {
    pub companies: Store<Company>,
    pub employees: Store<Employee>,
    pub accounts: AccountDirectory,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            companies: Store::new(),
            employees: Store::new(),
            accounts: AccountDirectory::new(),
        }
    }

    /// Seed the administrator account declared in configuration. Skipped
    /// when no password is configured (staging/production without env vars).
    pub async fn seed_bootstrap_admin(&self) {
        let security = &config::config().security;

        if security.bootstrap_admin_password.is_empty() {
            tracing::warn!("no bootstrap admin password configured; skipping admin seed");
            return;
        }

        self.accounts
            .insert(Account::new(
                security.bootstrap_admin_user.clone(),
                &security.bootstrap_admin_password,
                Role::Admin,
            ))
            .await;
        tracing::info!(username = %security.bootstrap_admin_user, "bootstrap admin seeded");
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
