use std::sync::Arc;

use crate::analysis::Analyzers;
use crate::config::Config;
use crate::store::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Storage gateway. Default: `PgStore`; handlers open one session per request.
    pub store: Arc<dyn AnalysisStore>,
    /// Pluggable analysis collaborators.
    pub analyzers: Analyzers,
    pub config: Config,
}
