//! CLI library components for the patient dataset builder.

pub mod logging;
pub mod pipeline;
pub mod types;
