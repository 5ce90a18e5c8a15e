//! Library half of the labreport CLI.

pub mod logging;
pub mod pipeline;
