use std::sync::Arc;

use crate::auth::IdentityVerifier;
use crate::config::Config;
use crate::render::RenderEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Rendering engine seam. Production: `ChromeEngine`. Tests inject a fake.
    pub engine: Arc<dyn RenderEngine>,
    /// Identity provider collaborator guarding the export routes.
    pub verifier: Arc<dyn IdentityVerifier>,
}
