//! Shared utilities for use cases.
//!
//! [`StageContext`] bundles the collaborators every stage needs (gateway,
//! parameters, progress, transcript) and owns the single code path through
//! which model calls are made, so that every request is logged the same way.

use crate::config::ExecutionParams;
use crate::ports::agent_progress::AgentProgressNotifier;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use reasoner_domain::RunStage;
use serde_json::json;
use tracing::{debug, warn};

/// Borrowed collaborators for one run.
pub(crate) struct StageContext<'a> {
    pub gateway: &'a dyn LlmGateway,
    pub params: &'a ExecutionParams,
    pub progress: &'a dyn AgentProgressNotifier,
    pub logger: &'a dyn ConversationLogger,
}

impl<'a> StageContext<'a> {
    /// Send one request to the model on behalf of `stage`.
    ///
    /// `call_index` is 1-based within the stage and only used for reporting.
    pub(crate) async fn send(
        &self,
        stage: RunStage,
        call_index: usize,
        system_prompt: &str,
        user_prompt: String,
        temperature: f32,
    ) -> Result<String, GatewayError> {
        let request = CompletionRequest::new(
            system_prompt,
            user_prompt,
            temperature,
            self.params.max_output_tokens,
        );

        self.progress.on_model_call_start(stage, call_index);
        self.logger.log(ConversationEvent::new(
            "llm_request",
            json!({
                "stage": stage.as_str(),
                "call": call_index,
                "model": self.gateway.model_name(),
                "temperature": temperature,
                "prompt": request.user_prompt,
            }),
        ));
        debug!(
            stage = %stage,
            call = call_index,
            temperature,
            prompt_bytes = request.user_prompt.len(),
            "Sending model request"
        );

        let result = self.gateway.complete(&request).await;
        self.progress.on_model_call_end(stage, result.is_ok());

        match &result {
            Ok(text) => {
                debug!(stage = %stage, call = call_index, response = %text, "Model replied");
                self.logger.log(ConversationEvent::new(
                    "llm_response",
                    json!({
                        "stage": stage.as_str(),
                        "call": call_index,
                        "text": text,
                    }),
                ));
            }
            Err(e) => {
                warn!(stage = %stage, call = call_index, error = %e, "Model request failed");
                self.logger.log(ConversationEvent::new(
                    "llm_response",
                    json!({
                        "stage": stage.as_str(),
                        "call": call_index,
                        "error": e.to_string(),
                    }),
                ));
            }
        }

        result
    }
}
