//! Application state module

mod analytics;
mod app_state;
mod forms;
mod polled;
mod workflow;

pub use analytics::*;
pub use app_state::*;
pub use forms::*;
pub use workflow::*;
