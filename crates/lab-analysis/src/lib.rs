//! Classification of extracted marker values and recommendation lookup.

mod classify;
mod recommend;

pub use classify::{abnormal_rows, classify};
pub use recommend::resolve_recommendations;
