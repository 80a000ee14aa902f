//! # Utility Functions and Helpers
//!
//! - [`logging`]: tracing subscriber and color control

pub mod logging;

pub use logging::initialize_logging;
