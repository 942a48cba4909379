//! Per-domain output contracts.
//!
//! Contracts are data: adding a domain means adding a contract and a match
//! arm here, not a new code path in the prompt builder or the verification
//! stages.

use crate::classification::TaskDomain;

/// Formatting and correctness rules attached to a [`TaskDomain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainContract {
    pub domain: TaskDomain,
    /// Human-readable label used in prompts
    pub label: &'static str,
    /// Required shape of the final answer
    pub output_contract: &'static str,
    /// What a verifier should check about the answer's correctness
    pub verification_criteria: &'static str,
}

static MATH: DomainContract = DomainContract {
    domain: TaskDomain::Math,
    label: "math",
    output_contract: "Give only the exact final numeric answer (or the boxed answer if the task \
asks for \\boxed{...}). No units, words, or working unless the task requests them.",
    verification_criteria: "Recompute every arithmetic step independently. Check the question \
was read correctly (what quantity is asked for, units, rounding) and that the number answers \
exactly that.",
};

static PLANNING: DomainContract = DomainContract {
    domain: TaskDomain::Planning,
    label: "planning",
    output_contract: "Give only the plan: one action per line, each action lowercase and \
wrapped in parentheses, e.g. (unstack b a). No numbering, bullets, or commentary.",
    verification_criteria: "Simulate the plan from the initial state. Every action's \
preconditions must hold when it is applied and the goal must hold after the last action.",
};

static CODING: DomainContract = DomainContract {
    domain: TaskDomain::Coding,
    label: "coding",
    output_contract: "Give only code. No comments or explanations unless requested. If a \
function signature is given, reproduce it exactly.",
    verification_criteria: "Check the code is syntactically valid, matches the required \
signature, and handles the stated cases.",
};

static FUTURE_PREDICTION: DomainContract = DomainContract {
    domain: TaskDomain::FuturePrediction,
    label: "future prediction",
    output_contract: "Give a single line containing only the prediction wrapped as \
\\boxed{...}, even if the outcome cannot be known.",
    verification_criteria: "Check the prediction addresses exactly the event asked about and \
uses the answer options the task allows.",
};

static COMMON_SENSE: DomainContract = DomainContract {
    domain: TaskDomain::CommonSense,
    label: "common sense",
    output_contract: "Give a single concise line with only the answer.",
    verification_criteria: "Check the answer is the most plausible one and directly answers \
the question.",
};

/// Look up the contract for a domain.
pub fn contract_for(domain: TaskDomain) -> &'static DomainContract {
    match domain {
        TaskDomain::Math => &MATH,
        TaskDomain::Planning => &PLANNING,
        TaskDomain::Coding => &CODING,
        TaskDomain::FuturePrediction => &FUTURE_PREDICTION,
        TaskDomain::CommonSense => &COMMON_SENSE,
    }
}
