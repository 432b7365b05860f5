pub mod app;
pub mod context;
pub mod i18n;
pub mod vm;
pub mod views;

pub use app::App;
pub use context::{AppContext, UiApp, build_app_context};
pub use i18n::Locale;
