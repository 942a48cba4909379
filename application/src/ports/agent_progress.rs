//! Agent run progress port.
//!
//! [`AgentProgressNotifier`] is an **output port** that the presentation layer
//! implements to display the progress of a run to the user.
//! All callback argument types come from the domain layer.
//!
//! # Callback Categories
//!
//! - **Classification**: the domain chosen for the task
//! - **Model callbacks**: each gateway call, start and end
//! - **Tool callbacks**: calculator results inside the tool-use loop
//! - **Stage callbacks**: tool loop, ensemble verification, self-verification
//! - **Failure**: the run aborted
//!
//! # Example Implementation
//!
//! ```ignore
//! use reasoner_application::ports::agent_progress::AgentProgressNotifier;
//!
//! struct MyProgress;
//!
//! impl AgentProgressNotifier for MyProgress {
//!     fn on_stage_start(&self, stage: RunStage) {
//!         println!("Stage: {}", stage);
//!     }
//! }
//! ```

use reasoner_domain::{PluralityOutcome, RunStage, TaskDomain, ToolInvocation};

/// Progress notifier for agent runs.
///
/// All methods have default no-op implementations, so implementers only
/// need to override the callbacks they care about.
pub trait AgentProgressNotifier: Send + Sync {
    /// Called once the task has been classified
    fn on_domain_classified(&self, _domain: TaskDomain) {}

    /// Called when a stage begins
    fn on_stage_start(&self, _stage: RunStage) {}

    /// Called when a stage finishes
    ///
    /// `changed` is true when the stage replaced the candidate answer.
    fn on_stage_complete(&self, _stage: RunStage, _changed: bool) {}

    /// Called before a gateway request is sent
    ///
    /// # Arguments
    /// * `stage` - The stage issuing the request
    /// * `call_index` - 1-based index of the call within the stage
    fn on_model_call_start(&self, _stage: RunStage, _call_index: usize) {}

    /// Called when a gateway request returns (success or failure)
    fn on_model_call_end(&self, _stage: RunStage, _success: bool) {}

    /// Called after the calculator evaluated an expression
    fn on_tool_result(&self, _invocation: &ToolInvocation) {}

    /// Called when the ensemble vote has been tallied
    fn on_vote_tallied(&self, _outcome: &PluralityOutcome) {}

    /// Called when a refinement stage kept the candidate because the model
    /// reply was unusable
    fn on_stage_degraded(&self, _stage: RunStage, _reason: &str) {}

    /// Called once when the run aborts; no further callbacks follow
    fn on_run_failed(&self, _error: &str) {}
}

/// No-op implementation for when progress isn't needed
pub struct NoAgentProgress;

impl AgentProgressNotifier for NoAgentProgress {}
