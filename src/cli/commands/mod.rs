//! CLI command implementations.

mod clean;
mod config;
mod doctor;
mod frame;
mod info;
mod plan;
mod split;

pub use clean::run_clean;
pub use config::run_config;
pub use doctor::run_doctor;
pub use frame::run_frame;
pub use info::run_info;
pub use plan::run_plan;
pub use split::run_split;
