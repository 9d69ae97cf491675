use crate::config::Config;
use crate::engine::submission::SubmissionCoordinator;
use axum::extract::FromRef;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub coordinator: SubmissionCoordinator,
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SubmissionCoordinator {
    fn from_ref(state: &AppState) -> Self {
        state.coordinator.clone()
    }
}
