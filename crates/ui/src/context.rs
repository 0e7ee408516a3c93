use std::sync::Arc;

use services::SessionController;

use crate::vm::ViewModelPresenter;

pub trait UiApp: Send + Sync {
    fn session_controller(&self) -> Arc<SessionController>;
    fn presenter(&self) -> Arc<ViewModelPresenter>;
}

#[derive(Clone)]
pub struct AppContext {
    session_controller: Arc<SessionController>,
    presenter: Arc<ViewModelPresenter>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session_controller: app.session_controller(),
            presenter: app.presenter(),
        }
    }

    #[must_use]
    pub fn session_controller(&self) -> Arc<SessionController> {
        Arc::clone(&self.session_controller)
    }

    #[must_use]
    pub fn presenter(&self) -> Arc<ViewModelPresenter> {
        Arc::clone(&self.presenter)
    }
}

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
