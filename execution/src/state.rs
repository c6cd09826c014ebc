use anyhow::Result;
use std::future::Future;
use tegridy_types::Account;

#[cfg(any(test, feature = "mocks"))]
use std::collections::HashMap;
#[cfg(any(test, feature = "mocks"))]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(any(test, feature = "mocks"))]
use std::sync::Mutex;

/// Durable account store.
///
/// `apply` must be all-or-nothing: either every account in `changes` is written or the
/// store is left exactly as it was before the call.
pub trait State: Send + Sync {
    fn get(&self, user_id: &str) -> impl Future<Output = Result<Option<Account>>> + Send;
    fn apply(&self, changes: Vec<Account>) -> impl Future<Output = Result<()>> + Send;
}

#[cfg(any(test, feature = "mocks"))]
#[derive(Default)]
pub struct Memory {
    state: Mutex<HashMap<String, Account>>,
    fail_applies: AtomicBool,
}

#[cfg(any(test, feature = "mocks"))]
impl Memory {
    /// Make every subsequent `apply` fail without writing anything.
    pub fn set_fail_applies(&self, fail: bool) {
        self.fail_applies.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|state| state.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(any(test, feature = "mocks"))]
impl State for Memory {
    async fn get(&self, user_id: &str) -> Result<Option<Account>> {
        let state = match self.state.lock() {
            Ok(state) => state,
            Err(_) => anyhow::bail!("memory state poisoned"),
        };
        Ok(state.get(user_id).cloned())
    }

    async fn apply(&self, changes: Vec<Account>) -> Result<()> {
        if self.fail_applies.load(Ordering::SeqCst) {
            anyhow::bail!("memory state rejected apply");
        }
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(_) => anyhow::bail!("memory state poisoned"),
        };
        for account in changes {
            state.insert(account.user_id.clone(), account);
        }
        Ok(())
    }
}
