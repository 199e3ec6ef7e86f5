//! Test context for unified test setup
//!
//! Starts a mock backend, a temporary session file and a service factory
//! wired to both.

use cuponme::{
    config::Settings,
    services::ServiceFactory,
    state::{SessionHolder, SessionStore},
};
use tempfile::TempDir;

use super::backend_mock::BackendMockServer;

/// Unified test context that manages all test components
pub struct TestContext {
    pub backend: BackendMockServer,
    pub settings: Settings,
    pub services: ServiceFactory,
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Create a new test context with no signed-in user
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // Initialize logging once
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let temp_dir = tempfile::tempdir()?;
        let backend = BackendMockServer::new().await;
        let settings = Self::create_test_settings(&backend, &temp_dir);

        let session = SessionHolder::empty(SessionStore::new(&settings.session));
        let services = ServiceFactory::new(&settings, session)?;

        Ok(Self {
            backend,
            settings,
            services,
            temp_dir,
        })
    }

    fn create_test_settings(backend: &BackendMockServer, temp_dir: &TempDir) -> Settings {
        let mut settings = Settings::default();

        settings.api = backend.api_config();
        settings.geo = backend.geo_config();
        settings.session.file_path = temp_dir
            .path()
            .join("session.json")
            .to_string_lossy()
            .to_string();
        settings.logging.level = "debug".to_string();

        settings
    }

    pub fn api(&self) -> &cuponme::ApiClient {
        &self.services.api
    }

    pub fn session(&self) -> &SessionHolder {
        self.services.session()
    }

    /// A store over the same session file, as a later run would open it
    pub fn reopen_store(&self) -> SessionStore {
        SessionStore::new(&self.settings.session)
    }
}
