use std::sync::Arc;

use crate::auth::{AuthService, PasswordHasher};
use crate::services::ExerciseCatalogClient;
use crate::storage::Storage;

/// Dependencies shared by every handler. Built once at startup and read-only
/// afterwards.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub auth_service: AuthService,
    pub hasher: PasswordHasher,
    pub catalog: Option<ExerciseCatalogClient>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn Storage>,
        auth_service: AuthService,
        hasher: PasswordHasher,
        catalog: Option<ExerciseCatalogClient>,
    ) -> Self {
        Self {
            storage,
            auth_service,
            hasher,
            catalog,
        }
    }
}
