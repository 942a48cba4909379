//! Prompt templates for each stage of an agent run

use super::contract::contract_for;
use crate::agent::ToolInvocation;
use crate::classification::TaskDomain;

/// One-line reply protocol shared by every stage
const OUTPUT_CONTRACT: &str = r#"Reply with exactly ONE line and nothing else, in one of these forms:
CALCULATE: <arithmetic expression>
FINAL: <answer>
Expressions may use only numbers, + - * / **, parentheses, and round(x, ndigits),
for example: CALCULATE: round((3*2.49)*1.07, 2)
Do not add explanations, reasoning steps, or any other text."#;

/// Reply protocol for refinement stages, which never call the calculator
const FINAL_ONLY_CONTRACT: &str = r#"Reply with exactly ONE line and nothing else, in this form:
FINAL: <answer>
Do not add explanations, reasoning steps, or any other text."#;

const PRIORITY_RULE: &str = "If the task itself gives explicit formatting or output \
instructions, those instructions ALWAYS take priority over the domain format rules above.";

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the tool-use loop
    pub fn agent_system() -> &'static str {
        r#"You are a reasoning agent that solves tasks from five domains: common sense questions,
future prediction, coding, math, and planning.
You have one tool, a calculator, which you call by replying CALCULATE: <expression>.
When you know the answer, reply FINAL: <answer>, where <answer> is exactly the expected
output (for example only the \boxed{...} value, only the code, or only the plan lines)."#
    }

    /// System prompt for ensemble verification passes
    pub fn verifier_system() -> &'static str {
        r#"You are a careful verifier. You receive a task and a proposed answer.
Think through the task step by step on your own before judging the proposed answer.
If the proposed answer is correct, return it unchanged; otherwise return the corrected answer.
Only the final one-line reply is read."#
    }

    /// System prompt for the self-verification pass
    pub fn self_verifier_system() -> &'static str {
        r#"You check answers for compliance with formatting instructions.
You never change the substance of a correct answer; you only repair its format.
When the answer already complies, you return it exactly as given."#
    }

    /// First prompt of the tool-use loop
    pub fn initial_prompt(task: &str, domain: TaskDomain) -> String {
        let contract = contract_for(domain);
        format!(
            r#"Task domain: {label}

Domain format rules:
{rules}

{priority}

Task:
{task}

If you need arithmetic to finish the task, reply CALCULATE: <expression>.
Otherwise reply FINAL: <answer>.

{output}"#,
            label = contract.label,
            rules = contract.output_contract,
            priority = PRIORITY_RULE,
            task = task,
            output = OUTPUT_CONTRACT,
        )
    }

    /// Prompt sent after a calculator call, carrying its result back to the model
    pub fn followup_prompt(task: &str, domain: TaskDomain, tool_result: &ToolInvocation) -> String {
        let contract = contract_for(domain);
        format!(
            r#"Task domain: {label}

Domain format rules:
{rules}

{priority}

Task:
{task}

The calculator evaluated: {expression}
Result: {value}

Use this result to continue. If another calculation is required, reply
CALCULATE: <expression>. Otherwise reply FINAL: <answer>.

{output}"#,
            label = contract.label,
            rules = contract.output_contract,
            priority = PRIORITY_RULE,
            task = task,
            expression = tool_result.expression,
            value = tool_result.display_value(),
            output = OUTPUT_CONTRACT,
        )
    }

    /// Prompt for one ensemble verification pass
    pub fn verification_prompt(task: &str, candidate: &str, domain: TaskDomain) -> String {
        let contract = contract_for(domain);
        format!(
            r#"Task domain: {label}

Task:
{task}

Proposed answer:
{candidate}

Correctness criteria:
{criteria}

Domain format rules:
{rules}

{priority}

Work through the task step by step yourself, then compare with the proposed answer.
If it is correct, return it unchanged. If it is wrong, return the corrected answer.

{output}"#,
            label = contract.label,
            task = task,
            candidate = candidate,
            criteria = contract.verification_criteria,
            rules = contract.output_contract,
            priority = PRIORITY_RULE,
            output = FINAL_ONLY_CONTRACT,
        )
    }

    /// Prompt for the final format check
    pub fn self_verification_prompt(task: &str, candidate: &str, domain: TaskDomain) -> String {
        let contract = contract_for(domain);
        format!(
            r#"Task:
{task}

Candidate answer:
{candidate}

Check the candidate answer against:
1. Any explicit formatting or output instructions in the task text.
2. The domain format rules: {rules}

When the two conflict, the task text wins.
If the candidate already complies, return it EXACTLY as given.
Otherwise return a minimally edited version that complies, without changing its substance.

{output}"#,
            task = task,
            candidate = candidate,
            rules = contract.output_contract,
            output = FINAL_ONLY_CONTRACT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_prompt_contains_all_parts() {
        let prompt = PromptTemplate::initial_prompt("What is 3+2?", TaskDomain::Math);
        assert!(prompt.contains("What is 3+2?"));
        assert!(prompt.contains("CALCULATE: <arithmetic expression>"));
        assert!(prompt.contains("FINAL: <answer>"));
        assert!(prompt.contains(contract_for(TaskDomain::Math).output_contract));
        assert!(prompt.contains("ALWAYS take priority"));
    }

    #[test]
    fn test_initial_prompt_uses_domain_contract() {
        let prompt = PromptTemplate::initial_prompt("[PLAN]", TaskDomain::Planning);
        assert!(prompt.contains(contract_for(TaskDomain::Planning).output_contract));
        assert!(!prompt.contains(contract_for(TaskDomain::Coding).output_contract));
    }

    #[test]
    fn test_followup_prompt_embeds_result() {
        let invocation = ToolInvocation::new("3+2", 5.0);
        let prompt = PromptTemplate::followup_prompt("What is 3+2?", TaskDomain::Math, &invocation);
        assert!(prompt.contains("What is 3+2?"));
        assert!(prompt.contains("The calculator evaluated: 3+2"));
        assert!(prompt.contains("Result: 5\n"));
        assert!(prompt.contains("CALCULATE: <arithmetic expression>"));
    }

    #[test]
    fn test_verification_prompt_has_criteria_and_candidate() {
        let prompt = PromptTemplate::verification_prompt("What is 3+2?", "5", TaskDomain::Math);
        assert!(prompt.contains("Proposed answer:\n5"));
        assert!(prompt.contains(contract_for(TaskDomain::Math).verification_criteria));
        assert!(!prompt.contains("CALCULATE:"));
    }

    #[test]
    fn test_self_verification_prompt() {
        let prompt = PromptTemplate::self_verification_prompt(
            "Answer in one word.",
            "Paris",
            TaskDomain::CommonSense,
        );
        assert!(prompt.contains("Candidate answer:\nParis"));
        assert!(prompt.contains("the task text wins"));
        assert!(prompt.contains(contract_for(TaskDomain::CommonSense).output_contract));
    }
}
