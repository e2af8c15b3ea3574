//! Action-to-roles privilege mapping.

use std::collections::{HashMap, HashSet};

use crate::grants::{Action, Role};

/// Read-only mapping from action names to the roles allowed to perform them.
///
/// The mapping is externally maintained configuration: built once at
/// startup, shared immutably (`Arc`) across request pipelines. A refresh
/// swaps the whole map rather than mutating in place, so concurrent readers
/// never observe a partial update. An action with no entry authorizes no
/// roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivilegeMap {
    grants: HashMap<Action, HashSet<Role>>,
}

impl PrivilegeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from `(action, roles)` pairs.
    pub fn from_entries<E, R>(entries: E) -> Self
    where
        E: IntoIterator<Item = (Action, R)>,
        R: IntoIterator<Item = Role>,
    {
        let mut map = Self::new();
        for (action, roles) in entries {
            map.grant(action, roles);
        }
        map
    }

    /// Allow `roles` to perform `action`, merging with any existing grant.
    pub fn grant(&mut self, action: Action, roles: impl IntoIterator<Item = Role>) {
        self.grants.entry(action).or_default().extend(roles);
    }

    /// Roles authorized for an action; `None` when the action is unmapped.
    pub fn roles_for(&self, action: &Action) -> Option<&HashSet<Role>> {
        self.grants.get(action)
    }
}
