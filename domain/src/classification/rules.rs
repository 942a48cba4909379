//! Lexical domain classification.
//!
//! Classification is an ordered decision table: each [`ClassificationRule`]
//! pairs a predicate over the lowercased task text with the domain it selects.
//! Rules are evaluated top-to-bottom and the first match wins; a task that
//! matches nothing is common-sense.
//!
//! Coding and planning are checked before math because their tasks routinely
//! contain quantitative words ("how many lines", "number of steps").

use super::task_domain::TaskDomain;

/// Imperative programming phrases.
const CODING_SIGNALS: &[&str] = &[
    "write a function",
    "write a python",
    "write a program",
    "write code",
    "python function",
    "implement a function",
    "implement the function",
    "complete the function",
    "complete the following code",
    "self-contained code",
    "code snippet",
    "function signature",
    "return the code",
    "def ",
    "```",
    "import ",
    "class solution",
];

/// Literal plan markers used by planning benchmarks.
const PLANNING_SIGNALS: &[&str] = &[
    "[plan]",
    "[plan end]",
    "[statement]",
    "my plan is as follows",
];

/// System-style phrasing that future-prediction tasks carry verbatim.
const FUTURE_PREDICTION_SIGNALS: &[&str] = &[
    "you are an agent that can predict future events",
    "the event to be predicted",
];

/// Broad arithmetic / quantitative vocabulary.
const MATH_SIGNALS: &[&str] = &[
    "how many",
    "how much",
    "calculate",
    "compute",
    "sum of",
    "product of",
    "total",
    "percent",
    "%",
    "solve",
    "equation",
    "integer",
    "probability",
    "remainder",
    "divisible",
    "area of",
    "perimeter",
    "average",
    "ratio",
    "fraction",
    "value of",
    "number of",
    "digits",
    "multiply",
    "divided by",
    "\\frac",
    "\\sqrt",
    "$",
    "+",
    "=",
    "^",
];

/// One row of the classification decision table.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Domain selected when the predicate matches
    pub domain: TaskDomain,
    /// Predicate over the lowercased task text
    pub predicate: fn(&str) -> bool,
}

impl ClassificationRule {
    /// Whether this rule fires for already-lowercased task text.
    pub fn matches(&self, lowered: &str) -> bool {
        (self.predicate)(lowered)
    }
}

fn contains_any(text: &str, signals: &[&str]) -> bool {
    signals.iter().any(|signal| text.contains(signal))
}

fn is_coding(text: &str) -> bool {
    contains_any(text, CODING_SIGNALS)
}

fn is_planning(text: &str) -> bool {
    contains_any(text, PLANNING_SIGNALS)
}

fn is_future_prediction(text: &str) -> bool {
    contains_any(text, FUTURE_PREDICTION_SIGNALS)
}

fn is_math(text: &str) -> bool {
    contains_any(text, MATH_SIGNALS)
}

/// The decision table, in precedence order.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        domain: TaskDomain::Coding,
        predicate: is_coding,
    },
    ClassificationRule {
        domain: TaskDomain::Planning,
        predicate: is_planning,
    },
    ClassificationRule {
        domain: TaskDomain::FuturePrediction,
        predicate: is_future_prediction,
    },
    ClassificationRule {
        domain: TaskDomain::Math,
        predicate: is_math,
    },
];

/// Classify a task into a [`TaskDomain`].
///
/// Pure and deterministic; never fails.
///
/// # Examples
///
/// ```
/// use reasoner_domain::classification::{classify, TaskDomain};
///
/// assert_eq!(classify("What is 3+2?"), TaskDomain::Math);
/// assert_eq!(classify("Where do penguins live?"), TaskDomain::CommonSense);
/// ```
pub fn classify(task: &str) -> TaskDomain {
    let lowered = task.to_lowercase();
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.domain)
        .unwrap_or_default()
}
