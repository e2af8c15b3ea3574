//! Layered authorization: role, then permission, then resource ownership.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::AuthError;
use crate::grants::{Action, Permission, Role};
use crate::privileges::PrivilegeMap;

/// A fully resolved principal for authorization decisions.
///
/// Construction is decoupled from transport and storage: callers derive the
/// subject and grant sets from verified claims (or any other identity
/// source) before evaluation begins. Both sets are read-only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Authenticated identity, minimally an email address.
    pub subject: String,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
}

/// What a protected operation demands: an action name (resolved to roles
/// through the privilege mapping) and the permissions accepted for it
/// (any-of).
///
/// The third leg of the check, the ownership predicate, is handed to
/// [`AuthorizationEvaluator::evaluate`] as a callable so the policy value
/// itself stays plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    pub action: Action,
    pub required_permissions: Vec<Permission>,
}

/// Proof that every check in the pipeline passed.
///
/// Only the evaluator constructs this; handlers accept it as evidence that
/// the guarded operation may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorized {
    _proof: (),
}

/// Decides allow/deny for one request.
///
/// The evaluation order is fixed (role, permission, ownership) so the cheap
/// set checks run before anything that could touch a datastore, and each
/// failure short-circuits the rest. Decisions mutate nothing: identical
/// inputs always yield identical outcomes.
#[derive(Clone)]
pub struct AuthorizationEvaluator {
    privileges: Arc<PrivilegeMap>,
    ownership_timeout: Duration,
}

impl AuthorizationEvaluator {
    pub fn new(privileges: Arc<PrivilegeMap>, ownership_timeout: Duration) -> Self {
        Self {
            privileges,
            ownership_timeout,
        }
    }

    /// Run the full check sequence for `principal` against `policy`.
    ///
    /// `ownership` answers "may this principal touch the resource in
    /// question" and may perform a lookup; it is awaited under the
    /// configured timeout and is not invoked at all when an earlier check
    /// already denied. A `false` answer is a definite denial
    /// (`ResourceCheckFailed`); a predicate error or a timeout is
    /// indeterminate (`ResourceCheckError`).
    pub async fn evaluate<F, Fut, E>(
        &self,
        principal: &Principal,
        policy: &AccessPolicy,
        ownership: F,
    ) -> Result<Authorized, AuthError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<bool, E>>,
        E: core::fmt::Display,
    {
        self.check_role(principal, &policy.action)?;
        self.check_permission(principal, policy)?;

        match tokio::time::timeout(self.ownership_timeout, ownership()).await {
            Err(_elapsed) => Err(AuthError::resource_check_error("ownership check timed out")),
            Ok(Err(e)) => Err(AuthError::resource_check_error(e.to_string())),
            Ok(Ok(false)) => Err(AuthError::ResourceCheckFailed),
            Ok(Ok(true)) => Ok(Authorized { _proof: () }),
        }
    }

    /// Step 1: the principal must hold at least one role mapped to the
    /// action. Unmapped actions authorize nobody.
    fn check_role(&self, principal: &Principal, action: &Action) -> Result<(), AuthError> {
        let allowed = self
            .privileges
            .roles_for(action)
            .ok_or_else(|| AuthError::insufficient_role(action.as_str()))?;

        if principal.roles.iter().any(|role| allowed.contains(role)) {
            Ok(())
        } else {
            Err(AuthError::insufficient_role(action.as_str()))
        }
    }

    /// Step 2: the principal's permission set must intersect the required
    /// set (any-of). An empty requirement passes; the `"*"` wildcard in the
    /// principal's set satisfies every requirement.
    fn check_permission(&self, principal: &Principal, policy: &AccessPolicy) -> Result<(), AuthError> {
        if policy.required_permissions.is_empty() {
            return Ok(());
        }

        let held: HashSet<&str> = principal.permissions.iter().map(|p| p.as_str()).collect();

        if held.contains("*")
            || policy
                .required_permissions
                .iter()
                .any(|p| held.contains(p.as_str()))
        {
            Ok(())
        } else {
            Err(AuthError::insufficient_permission(policy.action.as_str()))
        }
    }
}
