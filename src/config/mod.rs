//! Configuration loading and management for the export engine.
//!
//! This module loads the deployment settings (pay codes, the post-to-payroll
//! literal, the Daily Time date label) from YAML.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_export::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Overtime pay code: {}", config.pay_codes().overtime);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, SETTINGS_FILE};
pub use types::{ExportSettings, PayCodes};
