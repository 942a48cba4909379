//! Ensemble verification stage.
//!
//! Runs [`ENSEMBLE_PASSES`] independent verification passes at the ensemble
//! temperature and keeps the plurality answer. A pass whose reply is not a
//! `FINAL` action votes for the incoming candidate. A gateway failure aborts
//! the stage.

use crate::ports::conversation_logger::ConversationEvent;
use crate::ports::llm_gateway::GatewayError;
use crate::use_cases::shared::StageContext;
use reasoner_domain::{
    Action, Ballot, ENSEMBLE_PASSES, PluralityOutcome, PromptTemplate, RunStage, TaskDomain,
    parse_action,
};
use serde_json::json;
use tracing::{info, warn};

/// Verify `candidate` with a plurality vote over independent passes.
pub(crate) async fn ensemble_verify(
    ctx: &StageContext<'_>,
    task: &str,
    candidate: &str,
    domain: TaskDomain,
) -> Result<PluralityOutcome, GatewayError> {
    let mut ballots = Vec::with_capacity(ENSEMBLE_PASSES);

    for pass in 1..=ENSEMBLE_PASSES {
        let ballot = run_pass(ctx, pass, task, candidate, domain).await?;
        ctx.logger.log(ConversationEvent::new(
            "ensemble_pass",
            json!({
                "pass": pass,
                "answer": ballot.answer,
                "source": ballot.source,
            }),
        ));
        ballots.push(ballot);
    }

    let outcome = match PluralityOutcome::tally(ballots) {
        Some(outcome) => outcome,
        // Unreachable with a non-zero pass count; keep the candidate anyway
        None => return Ok(fallback_outcome(candidate)),
    };

    info!(
        winner_count = outcome.winner_count,
        total = outcome.total_votes,
        unanimous = outcome.is_unanimous(),
        fallbacks = outcome.fallback_count(),
        changed = outcome.winner != candidate,
        "Ensemble vote tallied {}",
        outcome.vote_summary()
    );
    ctx.progress.on_vote_tallied(&outcome);
    ctx.logger.log(ConversationEvent::new(
        "ensemble_vote",
        json!({
            "winner": outcome.winner,
            "winner_count": outcome.winner_count,
            "total_votes": outcome.total_votes,
            "fallbacks": outcome.fallback_count(),
        }),
    ));

    Ok(outcome)
}

async fn run_pass(
    ctx: &StageContext<'_>,
    pass: usize,
    task: &str,
    candidate: &str,
    domain: TaskDomain,
) -> Result<Ballot, GatewayError> {
    let stage = RunStage::EnsembleVerification;
    let reply = ctx
        .send(
            stage,
            pass,
            PromptTemplate::verifier_system(),
            PromptTemplate::verification_prompt(task, candidate, domain),
            ctx.params.ensemble_temperature,
        )
        .await?;

    let reason = match parse_action(&reply) {
        Ok(Action::Final(answer)) => return Ok(Ballot::revised(answer)),
        Ok(Action::Calculate(expression)) => {
            format!("verifier requested a calculation: {}", expression)
        }
        Err(e) => e.to_string(),
    };

    warn!(pass, reason = %reason, "Ensemble pass unusable, voting for the candidate");
    ctx.progress.on_stage_degraded(stage, &reason);
    Ok(Ballot::fallback(candidate))
}

fn fallback_outcome(candidate: &str) -> PluralityOutcome {
    PluralityOutcome {
        winner: candidate.to_string(),
        winner_count: 0,
        total_votes: 0,
        ballots: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionParams;
    use crate::ports::agent_progress::NoAgentProgress;
    use crate::ports::conversation_logger::NoConversationLogger;
    use crate::use_cases::shared::test_support::{Scripted, ScriptedGateway};
    use reasoner_domain::BallotSource;

    async fn verify(
        gateway: &ScriptedGateway,
        candidate: &str,
    ) -> Result<PluralityOutcome, GatewayError> {
        let params = ExecutionParams::default();
        let ctx = StageContext {
            gateway,
            params: &params,
            progress: &NoAgentProgress,
            logger: &NoConversationLogger,
        };
        ensemble_verify(&ctx, "What is 3+2?", candidate, TaskDomain::Math).await
    }

    #[tokio::test]
    async fn test_majority_wins() {
        let gateway = ScriptedGateway::texts(&["FINAL: A", "FINAL: A", "FINAL: B"]);
        let outcome = verify(&gateway, "C").await.unwrap();

        assert_eq!(outcome.winner, "A");
        assert_eq!(outcome.winner_count, 2);
        assert_eq!(gateway.call_count(), 3);
    }

    #[tokio::test]
    async fn test_all_distinct_keeps_first() {
        let gateway = ScriptedGateway::texts(&["FINAL: A", "FINAL: B", "FINAL: C"]);
        let outcome = verify(&gateway, "A").await.unwrap();
        assert_eq!(outcome.winner, "A");
    }

    #[tokio::test]
    async fn test_passes_use_ensemble_temperature() {
        let gateway = ScriptedGateway::texts(&["FINAL: 5", "FINAL: 5", "FINAL: 5"]);
        verify(&gateway, "5").await.unwrap();

        for request in gateway.requests() {
            assert_eq!(request.temperature, 0.7);
            assert!(request.user_prompt.contains("Proposed answer:\n5"));
        }
    }

    #[tokio::test]
    async fn test_malformed_passes_vote_for_candidate() {
        let gateway = ScriptedGateway::texts(&["no idea", "FINAL: 6", "CALCULATE: 3+2"]);
        let outcome = verify(&gateway, "5").await.unwrap();

        assert_eq!(outcome.winner, "5");
        assert_eq!(outcome.fallback_count(), 2);
        assert_eq!(outcome.ballots[0].source, BallotSource::Fallback);
        assert_eq!(outcome.ballots[1].source, BallotSource::Revised);
    }

    #[tokio::test]
    async fn test_gateway_failure_aborts_stage() {
        let gateway = ScriptedGateway::new(vec![
            Scripted::Text("FINAL: 7".into()),
            Scripted::Error("timeout".into()),
            Scripted::Text("FINAL: 7".into()),
        ]);
        let err = verify(&gateway, "5").await.unwrap_err();

        assert!(err.to_string().contains("timeout"));
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_final_wrapping_calculate_votes_for_candidate() {
        let gateway =
            ScriptedGateway::texts(&["FINAL: CALCULATE: 3+2", "FINAL: 5", "FINAL: 6"]);
        let outcome = verify(&gateway, "5").await.unwrap();

        assert_eq!(outcome.winner, "5");
        assert_eq!(outcome.ballots[0].source, BallotSource::Fallback);
        assert!(outcome.ballots.iter().all(|b| !b.answer.contains("CALCULATE")));
    }
}
