use std::sync::Arc;

use services::ChecklistService;

use crate::i18n::Locale;

pub trait UiApp: Send + Sync {
    fn title(&self) -> String;
    fn locale(&self) -> Locale;

    fn checklist(&self) -> Arc<ChecklistService>;
}

#[derive(Clone)]
pub struct AppContext {
    title: String,
    locale: Locale,
    checklist: Arc<ChecklistService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            title: app.title(),
            locale: app.locale(),
            checklist: app.checklist(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Locale the window opens with. The view keeps its own copy once the
    /// user switches language.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn checklist(&self) -> Arc<ChecklistService> {
        Arc::clone(&self.checklist)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
