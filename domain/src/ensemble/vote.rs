//! Plurality voting over free-text answers
//!
//! Each ensemble pass produces one [`Ballot`]; [`PluralityOutcome::tally`]
//! picks the most frequent exact answer string.

use serde::{Deserialize, Serialize};

/// How a ballot's answer was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallotSource {
    /// The pass returned a well-formed `FINAL:` answer
    Revised,
    /// The pass output was unusable; the previous candidate stands in
    Fallback,
}

/// One pass's answer
///
/// # Example
///
/// ```
/// use reasoner_domain::ensemble::Ballot;
///
/// let ballot = Ballot::revised("42");
/// assert!(!ballot.is_fallback());
///
/// let fallback = Ballot::fallback("41");
/// assert!(fallback.is_fallback());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub answer: String,
    pub source: BallotSource,
}

impl Ballot {
    pub fn revised(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            source: BallotSource::Revised,
        }
    }

    pub fn fallback(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            source: BallotSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == BallotSource::Fallback
    }
}

/// Result of a plurality vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluralityOutcome {
    /// The most frequent answer (first-seen among ties)
    pub winner: String,
    /// How many ballots carried the winner
    pub winner_count: usize,
    /// Total number of ballots
    pub total_votes: usize,
    /// All ballots in the order they were produced
    pub ballots: Vec<Ballot>,
}

impl PluralityOutcome {
    /// Tally ballots by exact answer string.
    ///
    /// Ties are broken by the order in which the tied answers first appeared.
    /// Returns `None` when there are no ballots.
    pub fn tally(ballots: Vec<Ballot>) -> Option<Self> {
        // Distinct answers in first-seen order with their counts
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for ballot in &ballots {
            match counts.iter_mut().find(|(answer, _)| *answer == ballot.answer) {
                Some((_, count)) => *count += 1,
                None => counts.push((ballot.answer.as_str(), 1)),
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for &(answer, count) in &counts {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((answer, count));
            }
        }
        let (winner, winner_count) = best?;
        let winner = winner.to_string();

        Some(Self {
            winner,
            winner_count,
            total_votes: ballots.len(),
            ballots,
        })
    }

    /// Check if every ballot agreed
    pub fn is_unanimous(&self) -> bool {
        self.winner_count == self.total_votes
    }

    /// Number of passes whose output was unusable
    pub fn fallback_count(&self) -> usize {
        self.ballots.iter().filter(|b| b.is_fallback()).count()
    }

    /// Visual summary, e.g. `[●●○]` where ● marks a ballot for the winner
    pub fn vote_summary(&self) -> String {
        let mut summary = String::from("[");
        for ballot in &self.ballots {
            summary.push(if ballot.answer == self.winner { '●' } else { '○' });
        }
        summary.push(']');
        summary
    }
}
