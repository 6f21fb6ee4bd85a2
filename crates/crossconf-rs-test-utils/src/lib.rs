//! Test helpers shared across crossconf crates.

pub mod config_dir;
pub mod models;

pub use config_dir::ConfigDir;
pub use models::{Alpha, Beta, Gamma, GammaEntry};
