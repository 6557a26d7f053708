pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::app::{build_router, AppState};
pub use crate::config::{ServerArgs, SiteConfig};
pub use crate::core::blueprint::{BlueprintService, RetryPolicy};
pub use crate::core::contact::ContactService;
pub use crate::utils::error::{Result, SiteError};
