//! src/services/storage_service.rs
//!
//! In-memory storage for the mock Swift service. [`Storage`] holds the
//! accounts and sessions; [`StorageService`] is the cloneable handle shared
//! by every request, serializing all access behind a single lock.

use crate::models::{
    account::Account,
    metadata::MetadataPolicy,
    session::{Session, new_token},
};
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Everything reachable from the accounts and sessions maps.
#[derive(Debug, Default)]
pub struct Storage {
    pub accounts: HashMap<String, Account>,
    pub sessions: HashMap<String, Session>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account. Returns false if the name is already taken, in
    /// which case the existing account is left untouched.
    pub fn add_account(&mut self, name: &str, password: &str) -> bool {
        if self.accounts.contains_key(name) {
            return false;
        }
        self.accounts
            .insert(name.to_string(), Account::new(name, password));
        true
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub fn account_mut(&mut self, name: &str) -> Option<&mut Account> {
        self.accounts.get_mut(name)
    }

    /// Check credentials and open a session, returning its token.
    pub fn authenticate(&mut self, username: &str, password: &str) -> Option<String> {
        let account = self.accounts.get(username)?;
        if account.password != password {
            return None;
        }
        let token = new_token();
        self.sessions.insert(
            token.clone(),
            Session {
                username: username.to_string(),
            },
        );
        debug!("opened session for account {}", username);
        Some(token)
    }

    pub fn session(&self, token: &str) -> Option<&Session> {
        self.sessions.get(token)
    }
}

/// Shared handle to the in-memory store.
///
/// Cloning is cheap; all clones see the same state. Every read or write goes
/// through [`StorageService::lock`], which is exclusive.
#[derive(Clone)]
pub struct StorageService {
    storage: Arc<Mutex<Storage>>,

    /// Which request headers are persisted as metadata.
    pub policy: Arc<MetadataPolicy>,

    requests: Arc<AtomicU64>,

    /// Advertised API base (`http://host:port/v1`) once a listener is bound.
    api_url: Option<Arc<str>>,
}

impl StorageService {
    pub fn new(policy: MetadataPolicy) -> Self {
        Self {
            storage: Arc::new(Mutex::new(Storage::new())),
            policy: Arc::new(policy),
            requests: Arc::new(AtomicU64::new(0)),
            api_url: None,
        }
    }

    /// Same store, advertising `url` as the base of account storage URLs.
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = Some(Arc::from(url));
        self
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    /// Take the global storage lock.
    pub async fn lock(&self) -> MutexGuard<'_, Storage> {
        self.storage.lock().await
    }

    pub async fn add_account(&self, name: &str, password: &str) -> bool {
        self.lock().await.add_account(name, password)
    }

    /// Transaction id for the next request, echoed as `X-Trans-Id`.
    pub fn next_trans_id(&self) -> String {
        let n = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        format!("tx{:021x}", n)
    }
}

impl Default for StorageService {
    fn default() -> Self {
        Self::new(MetadataPolicy::default())
    }
}
