//! CLI library components for the panel union tool.

pub mod logging;
pub mod run;
