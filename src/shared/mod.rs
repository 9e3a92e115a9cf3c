pub mod deadline;
pub mod logging;
pub mod tool_name;

pub use deadline::{call_with_deadline, DeadlineError};
pub use tool_name::{normalize_tool_name, ToolKey};
