//! Application layer for reasoner
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    agent_progress::{AgentProgressNotifier, NoAgentProgress},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
};
pub use use_cases::run_agent::{
    FailureCategory, RunAgentError, RunAgentInput, RunAgentOutput, RunAgentUseCase,
};
pub use use_cases::self_verify::SelfVerificationReport;
