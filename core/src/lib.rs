pub mod action;
pub mod compiler;
pub mod config;
pub mod serdable;
pub mod style;
pub mod testing;

pub use crate::config::HarnessConfig;
