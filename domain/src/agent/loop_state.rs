//! Tool-use loop states.
//!
//! ```text
//! AwaitingModel --Calculate--> Calculating --result--> AwaitingModel
//! AwaitingModel --Final------> Done
//! ```
//!
//! Every failure (gateway, parse, calculator, budget) aborts the loop, so
//! there is no failed state to model here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolLoopState {
    /// Waiting for the model's next action
    AwaitingModel,
    /// Evaluating a calculator expression
    Calculating,
    /// A final answer has been produced
    Done,
}

impl ToolLoopState {
    /// State reached after the model returns `action` while awaiting it.
    pub fn after_action(action: &Action) -> Self {
        match action {
            Action::Calculate(_) => ToolLoopState::Calculating,
            Action::Final(_) => ToolLoopState::Done,
        }
    }

    /// Whether `self -> next` is a legal edge.
    pub fn can_transition_to(self, next: ToolLoopState) -> bool {
        matches!(
            (self, next),
            (ToolLoopState::AwaitingModel, ToolLoopState::Calculating)
                | (ToolLoopState::AwaitingModel, ToolLoopState::Done)
                | (ToolLoopState::Calculating, ToolLoopState::AwaitingModel)
        )
    }
}

impl fmt::Display for ToolLoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolLoopState::AwaitingModel => write!(f, "AWAITING_MODEL"),
            ToolLoopState::Calculating => write!(f, "CALCULATING"),
            ToolLoopState::Done => write!(f, "DONE"),
        }
    }
}
