use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{password_digest, Role};

/// Login principal used by the token issuance endpoint. Passwords are kept
/// only as SHA-256 digests.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub password_digest: String,
    pub role: Role,
}

impl Account {
    pub fn new(username: impl Into<String>, password: &str, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            password_digest: password_digest(password),
            role,
        }
    }
}

/// Username-keyed account lookup shared across request tasks.
#[derive(Debug)]
pub struct AccountDirectory {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl Clone for AccountDirectory {
    fn clone(&self) -> Self {
        Self {
            accounts: Arc::clone(&self.accounts),
        }
    }
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn insert(&self, account: Account) {
        self.accounts.write().await.push(account);
    }

    /// Resolve credentials to an account. Returns `None` for an unknown
    /// username and for a wrong password alike, so callers cannot tell the
    /// two apart.
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<Account> {
        let digest = password_digest(password);
        self.accounts
            .read()
            .await
            .iter()
            .find(|a| a.username == username && a.password_digest == digest)
            .cloned()
    }
}

impl Default for AccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}
