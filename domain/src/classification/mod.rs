//! Domain classification
//!
//! Maps raw task text to one of five fixed [`TaskDomain`]s using an ordered
//! table of lexical rules. No model call is involved.

pub mod rules;
pub mod task_domain;

pub use rules::{CLASSIFICATION_RULES, ClassificationRule, classify};
pub use task_domain::TaskDomain;
