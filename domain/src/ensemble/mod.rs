//! Ensemble verification domain
//!
//! A single stochastic reasoning pass is noisy. The ensemble stage runs
//! several independent passes over the same candidate and keeps the
//! plurality answer, so one erroneous revision cannot override a correct
//! candidate while an error that reproduces across passes still gets fixed.

pub mod vote;

pub use vote::{Ballot, BallotSource, PluralityOutcome};

/// Number of independent verification passes per run
pub const ENSEMBLE_PASSES: usize = 3;
