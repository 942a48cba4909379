//! Self-verification stage.
//!
//! One deterministic pass that checks the candidate against the formatting
//! instructions in the task and the domain contract. A reply that is not a
//! `FINAL` action leaves the candidate untouched. A gateway failure aborts
//! the stage.

use crate::ports::conversation_logger::ConversationEvent;
use crate::ports::llm_gateway::GatewayError;
use crate::use_cases::shared::StageContext;
use reasoner_domain::{Action, PromptTemplate, RunStage, TaskDomain, parse_action};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

/// Outcome of the self-verification pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfVerificationReport {
    /// The pass replaced the candidate
    pub changed: bool,
    /// Why the pass was discarded, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<String>,
}

/// Check and, if needed, repair the format of `candidate`.
///
/// Returns the (possibly unchanged) answer and a report.
pub(crate) async fn self_verify(
    ctx: &StageContext<'_>,
    task: &str,
    candidate: &str,
    domain: TaskDomain,
) -> Result<(String, SelfVerificationReport), GatewayError> {
    let stage = RunStage::SelfVerification;
    let reply = ctx
        .send(
            stage,
            1,
            PromptTemplate::self_verifier_system(),
            PromptTemplate::self_verification_prompt(task, candidate, domain),
            ctx.params.deterministic_temperature,
        )
        .await?;

    let (answer, report) = match parse_action(&reply) {
        Ok(Action::Final(answer)) => {
            let changed = answer != candidate;
            (
                answer,
                SelfVerificationReport {
                    changed,
                    degraded: None,
                },
            )
        }
        Ok(Action::Calculate(expression)) => degraded(
            candidate,
            format!("self-verifier requested a calculation: {}", expression),
        ),
        Err(e) => degraded(candidate, e.to_string()),
    };

    if let Some(reason) = &report.degraded {
        warn!(reason = %reason, "Self-verification reply unusable, keeping the candidate");
        ctx.progress.on_stage_degraded(stage, reason);
    } else {
        info!(changed = report.changed, "Self-verification complete");
    }
    ctx.logger.log(ConversationEvent::new(
        "self_verification",
        json!({
            "input": candidate,
            "output": answer,
            "changed": report.changed,
            "degraded": report.degraded,
        }),
    ));

    Ok((answer, report))
}

fn degraded(candidate: &str, reason: String) -> (String, SelfVerificationReport) {
    (
        candidate.to_string(),
        SelfVerificationReport {
            changed: false,
            degraded: Some(reason),
        },
    )
}
