//! Run Agent use case
//!
//! Answers one task by sequencing the stages of a run:
//!
//! | Stage                    | Math | Planning | Coding / Future / Common sense |
//! |--------------------------|------|----------|--------------------------------|
//! | 0. Classification        | yes  | yes      | yes                            |
//! | 1. Tool-use loop         | yes  | yes      | yes                            |
//! | 2. Ensemble verification | yes  | yes      | skip                           |
//! | 3. Self-verification     | yes  | yes      | yes                            |
//!
//! Any gateway failure aborts the run. Stage 1 also fails on a malformed
//! action, a calculator error or an exhausted budget. Stages 2 and 3 keep the
//! current candidate when the model reply is not a usable `FINAL` action.

mod types;

pub use types::{FailureCategory, RunAgentError, RunAgentInput, RunAgentOutput};

use crate::config::ExecutionParams;
use crate::ports::agent_progress::{AgentProgressNotifier, NoAgentProgress};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::ensemble_verify::ensemble_verify;
use crate::use_cases::self_verify::self_verify;
use crate::use_cases::shared::StageContext;
use crate::use_cases::tool_loop::run_tool_loop;
use reasoner_domain::{RunStage, classify};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for running the agent on a single task
pub struct RunAgentUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    params: ExecutionParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> Clone for RunAgentUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            params: self.params.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl<G: LlmGateway + 'static> RunAgentUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            params: ExecutionParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    /// Set a transcript logger for run events
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Answer `task` with at most `max_tool_uses` calculator calls.
    pub async fn run(&self, task: &str, max_tool_uses: usize) -> Result<String, RunAgentError> {
        let input = RunAgentInput::new(task).with_max_tool_uses(max_tool_uses);
        self.execute(input).await.map(|output| output.answer)
    }

    /// Execute a run without progress reporting
    pub async fn execute(&self, input: RunAgentInput) -> Result<RunAgentOutput, RunAgentError> {
        self.execute_with_progress(input, &NoAgentProgress).await
    }

    /// Execute a run, reporting progress to `progress`
    pub async fn execute_with_progress(
        &self,
        input: RunAgentInput,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<RunAgentOutput, RunAgentError> {
        let task = input.task.content();
        let max_tool_uses = input.max_tool_uses.unwrap_or(self.params.max_tool_uses);

        self.conversation_logger.log(ConversationEvent::new(
            "run_started",
            json!({
                "task": task,
                "max_tool_uses": max_tool_uses,
                "model": self.gateway.model_name(),
            }),
        ));

        let result = self.run_stages(task, max_tool_uses, progress).await;

        match &result {
            Ok(output) => {
                info!(
                    domain = %output.domain,
                    tool_uses = output.tool_invocations.len(),
                    refined = output.was_refined(),
                    "Run completed"
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "run_completed",
                    json!({
                        "answer": output.answer,
                        "domain": output.domain,
                        "tool_uses": output.tool_invocations.len(),
                    }),
                ));
            }
            Err(e) => {
                warn!(category = %e.category(), error = %e, "Run failed");
                progress.on_run_failed(&e.to_string());
                self.conversation_logger.log(ConversationEvent::new(
                    "run_failed",
                    json!({
                        "category": e.category(),
                        "error": e.to_string(),
                    }),
                ));
            }
        }

        result
    }

    async fn run_stages(
        &self,
        task: &str,
        max_tool_uses: usize,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<RunAgentOutput, RunAgentError> {
        let ctx = StageContext {
            gateway: self.gateway.as_ref(),
            params: &self.params,
            progress,
            logger: self.conversation_logger.as_ref(),
        };

        // Stage 0: classification
        let domain = classify(task);
        info!(domain = %domain, "Task classified");
        progress.on_domain_classified(domain);
        self.conversation_logger.log(ConversationEvent::new(
            "domain_classified",
            json!({ "domain": domain }),
        ));

        // Stage 1: tool-use loop
        progress.on_stage_start(RunStage::ToolLoop);
        let tool_loop = run_tool_loop(&ctx, task, domain, max_tool_uses).await?;
        progress.on_stage_complete(RunStage::ToolLoop, true);
        let mut candidate = tool_loop.candidate.clone();

        // Stage 2: ensemble verification
        let ensemble = if domain.uses_ensemble_verification() {
            progress.on_stage_start(RunStage::EnsembleVerification);
            let outcome = ensemble_verify(&ctx, task, &candidate, domain).await?;
            let changed = outcome.winner != candidate;
            progress.on_stage_complete(RunStage::EnsembleVerification, changed);
            candidate = outcome.winner.clone();
            Some(outcome)
        } else {
            None
        };

        // Stage 3: self-verification
        progress.on_stage_start(RunStage::SelfVerification);
        let (answer, self_verification) = self_verify(&ctx, task, &candidate, domain).await?;
        progress.on_stage_complete(RunStage::SelfVerification, self_verification.changed);

        Ok(RunAgentOutput {
            answer,
            domain,
            tool_invocations: tool_loop.invocations,
            tool_loop_answer: tool_loop.candidate,
            ensemble,
            self_verification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::shared::test_support::{RecordingLogger, Scripted, ScriptedGateway};
    use reasoner_domain::{TaskDomain, ToolInvocation};
    use std::sync::Mutex;

    const PLANNING_TASK: &str = "[STATEMENT]\nAs initial conditions I have that the hand is empty.\n\
        My goal is to have that the orange block is on top of the red block.\n\
        My plan is as follows:\n\n[PLAN]";

    fn make_use_case(
        gateway: ScriptedGateway,
    ) -> (RunAgentUseCase<ScriptedGateway>, Arc<ScriptedGateway>) {
        let gateway = Arc::new(gateway);
        (RunAgentUseCase::new(gateway.clone()), gateway)
    }

    #[test]
    fn test_error_display() {
        let err = RunAgentError::from(reasoner_domain::ToolBudgetExceeded { limit: 2 });
        assert_eq!(err.to_string(), "Exceeded tool-use limit of 2");
        assert_eq!(err.category().as_str(), "tool_budget_exceeded");
    }

    #[tokio::test]
    async fn test_end_to_end_math() {
        let (use_case, gateway) = make_use_case(ScriptedGateway::texts(&[
            "CALCULATE: 3+2",
            "FINAL: 5",
            "FINAL: 5",
            "FINAL: 5",
            "FINAL: 4",
            "FINAL: 5",
        ]));

        let output = use_case
            .execute(RunAgentInput::new("What is 3+2?"))
            .await
            .unwrap();

        assert_eq!(output.domain, TaskDomain::Math);
        assert_eq!(output.tool_invocations, vec![ToolInvocation::new("3+2", 5.0)]);
        assert_eq!(output.answer, "5");
        assert!(!output.answer.contains('\n'));

        let ensemble = output.ensemble.unwrap();
        assert_eq!(ensemble.winner, "5");
        assert_eq!(ensemble.winner_count, 2);
        assert!(!output.self_verification.changed);

        // 2 tool-loop calls, 3 ensemble passes, 1 self-verification
        assert_eq!(gateway.call_count(), 6);
    }

    #[tokio::test]
    async fn test_run_returns_plain_answer() {
        let (use_case, _) = make_use_case(ScriptedGateway::texts(&[
            "FINAL: Paris",
            "FINAL: Paris",
        ]));

        let answer = use_case.run("Which city is the capital of France?", 2).await.unwrap();
        assert_eq!(answer, "Paris");
    }

    #[tokio::test]
    async fn test_common_sense_skips_ensemble() {
        let (use_case, gateway) =
            make_use_case(ScriptedGateway::texts(&["FINAL: yes", "FINAL: yes"]));

        let output = use_case
            .execute(RunAgentInput::new("Is the sky blue on a clear day?"))
            .await
            .unwrap();

        assert_eq!(output.domain, TaskDomain::CommonSense);
        assert!(output.ensemble.is_none());
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_planning_runs_ensemble() {
        let plan = "(pick-up orange)\n(stack orange red)";
        let reply = format!("FINAL: {}", plan);
        let (use_case, gateway) = make_use_case(ScriptedGateway::texts(&[
            reply.as_str(),
            reply.as_str(),
            reply.as_str(),
            reply.as_str(),
            reply.as_str(),
        ]));

        let output = use_case.execute(RunAgentInput::new(PLANNING_TASK)).await.unwrap();

        assert_eq!(output.domain, TaskDomain::Planning);
        assert_eq!(output.answer, plan);
        let plan_shape = regex::Regex::new(r"^(\(\S+( \S+)*\)\n?)+$").unwrap();
        assert!(plan_shape.is_match(&output.answer));
        assert_eq!(output.answer, output.answer.to_lowercase());
        assert!(output.ensemble.unwrap().is_unanimous());
        assert_eq!(gateway.call_count(), 5);
    }

    #[tokio::test]
    async fn test_budget_exceeded_skips_later_stages() {
        let (use_case, gateway) = make_use_case(ScriptedGateway::texts(&[
            "CALCULATE: 1+1",
            "CALCULATE: 2+2",
            "CALCULATE: 3+3",
        ]));

        let err = use_case.run("What is 1+1?", 2).await.unwrap_err();

        assert_eq!(err.category(), FailureCategory::ToolBudgetExceeded);
        assert_eq!(gateway.call_count(), 3);
    }

    #[tokio::test]
    async fn test_malformed_action_fails_run() {
        let (use_case, _) = make_use_case(ScriptedGateway::texts(&["5"]));

        let err = use_case.run("What is 3+2?", 2).await.unwrap_err();
        assert!(matches!(err, RunAgentError::MalformedAction(_)));
    }

    #[tokio::test]
    async fn test_unusable_refinement_replies_keep_candidate() {
        let (use_case, _) = make_use_case(ScriptedGateway::texts(&[
            "FINAL: 5",
            "garbage",
            "CALCULATE: 3+2",
            "FINAL: CALCULATE: 3+2",
            "also garbage",
        ]));

        let output = use_case
            .execute(RunAgentInput::new("What is 3+2?"))
            .await
            .unwrap();

        assert_eq!(output.answer, "5");
        assert_eq!(output.ensemble.unwrap().fallback_count(), 3);
        assert!(output.self_verification.degraded.is_some());
    }

    #[tokio::test]
    async fn test_ensemble_gateway_failure_fails_run() {
        let (use_case, gateway) = make_use_case(ScriptedGateway::new(vec![
            Scripted::Text("FINAL: 5".into()),
            Scripted::Error("down".into()),
        ]));

        let err = use_case.run("What is 3+2?", 2).await.unwrap_err();

        assert_eq!(err.category(), FailureCategory::GatewayFailure);
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_self_verification_gateway_failure_fails_run() {
        let (use_case, _) = make_use_case(ScriptedGateway::new(vec![
            Scripted::Text("FINAL: yes".into()),
            Scripted::Error("down".into()),
        ]));

        let err = use_case.run("Is water wet?", 2).await.unwrap_err();
        assert_eq!(err.category(), FailureCategory::GatewayFailure);
    }

    #[tokio::test]
    async fn test_final_wrapping_calculate_fails_tool_loop() {
        let (use_case, gateway) =
            make_use_case(ScriptedGateway::texts(&["FINAL: CALCULATE: 3+2"]));

        let err = use_case.run("What is 3+2?", 2).await.unwrap_err();

        assert_eq!(err.category(), FailureCategory::MalformedAction);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_input_budget_overrides_params() {
        let (use_case, _) = make_use_case(ScriptedGateway::texts(&[
            "CALCULATE: 1+1",
            "FINAL: 2",
            "FINAL: 2",
        ]));
        let use_case = use_case.with_params(ExecutionParams::default().with_max_tool_uses(5));

        let err = use_case
            .execute(RunAgentInput::new("Is two a small number?").with_max_tool_uses(0))
            .await
            .unwrap_err();
        assert_eq!(err.category(), FailureCategory::ToolBudgetExceeded);
    }

    #[tokio::test]
    async fn test_transcript_events_in_order() {
        let logger = Arc::new(RecordingLogger::default());
        let (use_case, _) = make_use_case(ScriptedGateway::texts(&["FINAL: yes", "FINAL: yes"]));
        let use_case = use_case.with_conversation_logger(logger.clone());

        use_case.run("Is water wet?", 2).await.unwrap();

        assert_eq!(
            logger.event_types(),
            vec![
                "run_started",
                "domain_classified",
                "llm_request",
                "llm_response",
                "llm_request",
                "llm_response",
                "self_verification",
                "run_completed",
            ]
        );
    }

    /// Progress notifier that records stage boundaries
    #[derive(Default)]
    struct TrackingProgress {
        stages: Mutex<Vec<(RunStage, bool)>>,
        failures: Mutex<Vec<String>>,
    }

    impl AgentProgressNotifier for TrackingProgress {
        fn on_stage_complete(&self, stage: RunStage, changed: bool) {
            self.stages.lock().unwrap().push((stage, changed));
        }

        fn on_run_failed(&self, error: &str) {
            self.failures.lock().unwrap().push(error.to_string());
        }
    }

    #[tokio::test]
    async fn test_progress_reports_stages() {
        let (use_case, _) = make_use_case(ScriptedGateway::texts(&[
            "FINAL: 4",
            "FINAL: 5",
            "FINAL: 5",
            "FINAL: 4",
            "FINAL: 5",
        ]));
        let progress = TrackingProgress::default();

        let output = use_case
            .execute_with_progress(RunAgentInput::new("What is 3+2?"), &progress)
            .await
            .unwrap();

        assert_eq!(output.answer, "5");
        assert!(output.was_refined());
        assert_eq!(
            *progress.stages.lock().unwrap(),
            vec![
                (RunStage::ToolLoop, true),
                (RunStage::EnsembleVerification, true),
                (RunStage::SelfVerification, false),
            ]
        );
    }

    #[tokio::test]
    async fn test_progress_reports_failure() {
        let (use_case, _) = make_use_case(ScriptedGateway::texts(&["5"]));
        let progress = TrackingProgress::default();

        use_case
            .execute_with_progress(RunAgentInput::new("What is 3+2?"), &progress)
            .await
            .unwrap_err();

        assert!(progress.stages.lock().unwrap().is_empty());
        let failures = progress.failures.lock().unwrap();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("Malformed action"));
    }
}
