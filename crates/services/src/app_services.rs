use std::sync::Arc;

use storage::repository::Storage;

use crate::config::QuestionSourceConfig;
use crate::error::AppServicesError;
use crate::presenter::Presenter;
use crate::question_source::{OpenTdbSource, QuestionSource};
use crate::session::SessionController;
use crate::streak_service::StreakService;

/// Assembles app-facing services around one session controller.
#[derive(Clone)]
pub struct AppServices {
    controller: Arc<SessionController>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP question source.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage or the HTTP client cannot be initialised.
    pub async fn new_sqlite(
        db_url: &str,
        config: &QuestionSourceConfig,
        presenter: Arc<dyn Presenter>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let source: Arc<dyn QuestionSource> = Arc::new(OpenTdbSource::new(config)?);
        Ok(Self::from_parts(&storage, source, presenter))
    }

    /// Build services from already-constructed collaborators.
    #[must_use]
    pub fn from_parts(
        storage: &Storage,
        source: Arc<dyn QuestionSource>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        let streaks = StreakService::new(Arc::clone(&storage.streaks));
        let controller = Arc::new(SessionController::new(source, streaks, presenter));
        Self { controller }
    }

    #[must_use]
    pub fn session_controller(&self) -> Arc<SessionController> {
        Arc::clone(&self.controller)
    }
}
