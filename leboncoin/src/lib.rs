mod app;
pub mod forms;
pub mod logging;

pub use app::{routes, App, NEW_AD_PATH};

// Always expose testing module (integration tests need it)
pub mod testing;
