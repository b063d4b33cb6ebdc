//! Configuration module for SleekFinance
//!
//! - Path resolution for settings and snapshot files
//! - User settings (base currency and exchange rates)

pub mod paths;
pub mod settings;

pub use paths::SleekPaths;
pub use settings::{ExchangeRate, Settings};
