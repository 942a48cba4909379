//! Agent run domain
//!
//! State and bookkeeping for one agent run:
//!
//! - [`RunStage`]: tool loop, ensemble verification, self-verification
//! - [`ToolLoopState`]: `AWAITING_MODEL` / `CALCULATING` / `DONE`
//! - [`ToolBudget`]: per-run cap on calculator calls
//! - [`ToolInvocation`]: record of one calculator call

pub mod loop_state;
pub mod stage;
pub mod tool_budget;
pub mod value_objects;

pub use loop_state::ToolLoopState;
pub use stage::RunStage;
pub use tool_budget::{DEFAULT_MAX_TOOL_USES, ToolBudget, ToolBudgetExceeded};
pub use value_objects::ToolInvocation;
