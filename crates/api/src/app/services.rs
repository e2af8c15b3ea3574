//! Service wiring behind the routes.

use std::sync::Arc;

use keyward_auth::{
    Action, AuthorizationEvaluator, ClaimReader, Hs256ClaimReader, PrivilegeMap, Role,
};
use keyward_users::{InMemoryUserDirectory, UserService};

use crate::app::AppConfig;

/// Everything the handlers need, injected as one `Extension`.
///
/// All collaborators arrive through this struct; nothing is reached through
/// globals, so tests can wire alternates freely.
pub struct AppServices {
    pub claim_reader: Arc<dyn ClaimReader>,
    pub evaluator: AuthorizationEvaluator,
    pub users: UserService,
    pub directory: Arc<InMemoryUserDirectory>,
}

/// Wire the production service graph from startup configuration.
pub fn build_services(config: &AppConfig) -> AppServices {
    let claim_reader: Arc<dyn ClaimReader> =
        Arc::new(Hs256ClaimReader::new(config.jwt_secret.as_bytes()));

    let evaluator = AuthorizationEvaluator::new(
        Arc::new(default_privileges()),
        config.ownership_check_timeout,
    );

    let directory = Arc::new(InMemoryUserDirectory::new());
    let users = UserService::new(directory.clone());

    AppServices {
        claim_reader,
        evaluator,
        users,
        directory,
    }
}

/// The deployment's action→roles configuration.
///
/// Externally maintained in spirit; until a real configuration source
/// exists this is the one place the table lives.
fn default_privileges() -> PrivilegeMap {
    PrivilegeMap::from_entries([(
        Action::new("LOAD.USER"),
        [Role::new("visitor"), Role::new("administrator")],
    )])
}
