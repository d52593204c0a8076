use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable analyzer. Default: WebhookAnalyzer pointed at `config.webhook_url`.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    pub config: Config,
}
