use anyhow::Result;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tegridy_types::Account;
use tracing::debug;

use crate::state::State;

struct Staged {
    /// Committed copy, `None` when the account is being created by this layer.
    original: Option<Account>,
    current: Account,
}

/// Read-modify-write transaction over a [`State`].
///
/// Accounts are loaded (or created) into the layer, mutated in place by the engines, and
/// handed back to the store as one batch by [`Layer::commit`]. Dropping the layer discards
/// every staged change.
pub struct Layer<'a, S: State> {
    state: &'a S,
    pending: BTreeMap<String, Staged>,
}

impl<'a, S: State> Layer<'a, S> {
    pub fn new(state: &'a S) -> Self {
        Self {
            state,
            pending: BTreeMap::new(),
        }
    }

    /// Return the account for `user_id`, staging a zeroed one if the store has none.
    ///
    /// Repeated calls within the same layer return the same in-flight account.
    pub async fn get_or_create(&mut self, user_id: &str) -> Result<&mut Account> {
        let staged = match self.pending.entry(user_id.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let original = self.state.get(user_id).await?;
                let current = match &original {
                    Some(account) => account.clone(),
                    None => {
                        debug!(user_id, "staging new account");
                        Account::new(user_id)
                    }
                };
                entry.insert(Staged { original, current })
            }
        };
        Ok(&mut staged.current)
    }

    /// Accounts that were created or changed, ready for [`State::apply`].
    pub fn commit(self) -> Vec<Account> {
        self.pending
            .into_values()
            .filter(|staged| staged.original.as_ref() != Some(&staged.current))
            .map(|staged| staged.current)
            .collect()
    }
}
