//! Tool-use loop.
//!
//! Alternates model calls and calculator evaluations until the model
//! produces a `FINAL` action:
//!
//! ```text
//! AWAITING_MODEL --CALCULATE--> CALCULATING --result--> AWAITING_MODEL
//! AWAITING_MODEL --FINAL------> DONE
//! ```
//!
//! Every failure is fatal: gateway errors, unparseable replies, calculator
//! errors and exceeding the budget all abort the run. There is no re-prompt.

use crate::ports::conversation_logger::ConversationEvent;
use crate::use_cases::run_agent::RunAgentError;
use crate::use_cases::shared::StageContext;
use reasoner_domain::{
    Action, PromptTemplate, RunStage, TaskDomain, ToolBudget, ToolInvocation, ToolLoopState,
    evaluate, parse_action,
};
use serde_json::json;
use tracing::{debug, info};

/// Result of a completed tool-use loop
#[derive(Debug, Clone)]
pub(crate) struct ToolLoopOutcome {
    /// First candidate answer
    pub candidate: String,
    /// Calculator calls, in order
    pub invocations: Vec<ToolInvocation>,
}

/// Run the loop for `task` with at most `max_tool_uses` calculator calls.
pub(crate) async fn run_tool_loop(
    ctx: &StageContext<'_>,
    task: &str,
    domain: TaskDomain,
    max_tool_uses: usize,
) -> Result<ToolLoopOutcome, RunAgentError> {
    let mut budget = ToolBudget::new(max_tool_uses);
    let mut invocations = Vec::new();
    let mut prompt = PromptTemplate::initial_prompt(task, domain);
    let mut state = ToolLoopState::AwaitingModel;
    let mut call_index = 0;

    loop {
        call_index += 1;
        let reply = ctx
            .send(
                RunStage::ToolLoop,
                call_index,
                PromptTemplate::agent_system(),
                prompt,
                ctx.params.deterministic_temperature,
            )
            .await?;

        let action = parse_action(&reply)?;
        let next = ToolLoopState::after_action(&action);
        debug_assert!(state.can_transition_to(next));
        debug!(from = %state, to = %next, "Tool loop transition");
        state = next;

        let expression = match action {
            Action::Final(answer) => {
                info!(
                    tool_uses = budget.used(),
                    "Tool loop produced a candidate answer"
                );
                return Ok(ToolLoopOutcome {
                    candidate: answer,
                    invocations,
                });
            }
            Action::Calculate(expression) => expression,
        };

        budget.consume()?;
        let value = evaluate(&expression)?;
        let invocation = ToolInvocation::new(expression, value);

        info!(
            expression = %invocation.expression,
            value = %invocation.display_value(),
            used = budget.used(),
            limit = budget.limit(),
            "Calculator evaluated expression"
        );
        ctx.progress.on_tool_result(&invocation);
        ctx.logger.log(ConversationEvent::new(
            "tool_call",
            json!({
                "expression": invocation.expression,
                "value": invocation.value,
                "used": budget.used(),
                "limit": budget.limit(),
            }),
        ));

        prompt = PromptTemplate::followup_prompt(task, domain, &invocation);
        invocations.push(invocation);
        debug_assert!(state.can_transition_to(ToolLoopState::AwaitingModel));
        state = ToolLoopState::AwaitingModel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionParams;
    use crate::ports::agent_progress::NoAgentProgress;
    use crate::ports::conversation_logger::NoConversationLogger;
    use crate::use_cases::run_agent::FailureCategory;
    use crate::use_cases::shared::test_support::{Scripted, ScriptedGateway};

    async fn run(
        gateway: &ScriptedGateway,
        task: &str,
        max_tool_uses: usize,
    ) -> Result<ToolLoopOutcome, RunAgentError> {
        let params = ExecutionParams::default();
        let ctx = StageContext {
            gateway,
            params: &params,
            progress: &NoAgentProgress,
            logger: &NoConversationLogger,
        };
        run_tool_loop(&ctx, task, TaskDomain::Math, max_tool_uses).await
    }

    #[tokio::test]
    async fn test_final_on_first_reply() {
        let gateway = ScriptedGateway::texts(&["FINAL: 42"]);
        let outcome = run(&gateway, "What is 6*7?", 2).await.unwrap();

        assert_eq!(outcome.candidate, "42");
        assert!(outcome.invocations.is_empty());
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_calculate_then_final() {
        let gateway = ScriptedGateway::texts(&["CALCULATE: 3+2", "FINAL: \\boxed{5}"]);
        let outcome = run(&gateway, "What is 3+2?", 2).await.unwrap();

        assert_eq!(outcome.candidate, "\\boxed{5}");
        assert_eq!(outcome.invocations, vec![ToolInvocation::new("3+2", 5.0)]);

        let requests = gateway.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].user_prompt.contains("What is 3+2?"));
        assert!(requests[1].user_prompt.contains("3+2"));
        assert!(requests[1].user_prompt.contains("Result: 5"));
        assert_eq!(requests[0].temperature, 0.0);
    }

    #[tokio::test]
    async fn test_budget_exceeded_is_fatal() {
        let gateway = ScriptedGateway::texts(&["CALCULATE: 1+1", "CALCULATE: 2+2", "FINAL: 4"]);
        let err = run(&gateway, "task", 1).await.unwrap_err();

        assert!(matches!(
            err,
            RunAgentError::ToolBudgetExceeded(ref e) if e.limit == 1
        ));
        assert_eq!(err.category(), FailureCategory::ToolBudgetExceeded);
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_zero_budget_rejects_first_calculation() {
        let gateway = ScriptedGateway::texts(&["CALCULATE: 1+1"]);
        let err = run(&gateway, "task", 0).await.unwrap_err();
        assert_eq!(err.category(), FailureCategory::ToolBudgetExceeded);
    }

    #[tokio::test]
    async fn test_malformed_reply_is_fatal_without_retry() {
        let gateway = ScriptedGateway::texts(&["The answer is 5", "FINAL: 5"]);
        let err = run(&gateway, "task", 2).await.unwrap_err();

        assert_eq!(err.category(), FailureCategory::MalformedAction);
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unsafe_expression_is_fatal() {
        let gateway = ScriptedGateway::texts(&["CALCULATE: __import__('os')"]);
        let err = run(&gateway, "task", 2).await.unwrap_err();
        assert_eq!(err.category(), FailureCategory::UnsafeExpression);
    }

    #[tokio::test]
    async fn test_division_by_zero_is_arithmetic() {
        let gateway = ScriptedGateway::texts(&["CALCULATE: 1/0"]);
        let err = run(&gateway, "task", 2).await.unwrap_err();
        assert_eq!(err.category(), FailureCategory::Arithmetic);
    }

    #[tokio::test]
    async fn test_gateway_failure_is_fatal() {
        let gateway = ScriptedGateway::new(vec![Scripted::Error("boom".into())]);
        let err = run(&gateway, "task", 2).await.unwrap_err();
        assert_eq!(err.category(), FailureCategory::GatewayFailure);
    }
}
