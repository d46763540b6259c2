//! Candidate scoring.
//!
//! Every match the solver finds is a legal move; these heuristics decide which one
//! to play. The base score is the pattern's priority (its required-cell count), and
//! some game modes add a bonus that depends on where the match sits on the board.
use crate::engine::ROW_COUNT;
use crate::geometry::GameMode;
use crate::solver::Candidate;

/// How candidates are ranked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScoringPolicy {
    /// Score is the pattern priority.
    #[default]
    Plain,
    /// Score is the pattern priority plus `2 * (ROW_COUNT - top_row)`.
    ///
    /// Matches whose window starts on a smaller row index receive the larger bonus.
    RowWeighted,
}

impl From<GameMode> for ScoringPolicy {
    /// Classic is row-weighted, every other mode is plain.
    fn from(mode: GameMode) -> Self {
        if mode.row_weighted_scoring() {
            ScoringPolicy::RowWeighted
        } else {
            ScoringPolicy::Plain
        }
    }
}

/// Mode-dependent bonus for a match whose window starts on `top_row`.
///
/// # Examples
/// ```
/// use jewel_solver::heuristics::{mode_bonus, ScoringPolicy};
/// assert_eq!(mode_bonus(ScoringPolicy::Plain, 3), 0);
/// assert_eq!(mode_bonus(ScoringPolicy::RowWeighted, 3), 10);
/// ```
pub fn mode_bonus(policy: ScoringPolicy, top_row: usize) -> u32 {
    match policy {
        ScoringPolicy::Plain => 0,
        ScoringPolicy::RowWeighted => 2 * (ROW_COUNT - top_row) as u32,
    }
}

/// Scores a single candidate.
pub fn score_candidate(candidate: &Candidate, policy: ScoringPolicy) -> u32 {
    candidate.pattern.priority + mode_bonus(policy, candidate.top_row)
}

/// Chooses the best candidate.
///
/// The highest score wins. Among equal scores the earliest candidate in `candidates`
/// wins, which makes the choice reproducible for a given search order.
///
/// # Returns
/// The winning candidate and its score, or `None` if `candidates` is empty.
pub fn choose_best_candidate(
    candidates: &[Candidate],
    policy: ScoringPolicy,
) -> Option<(Candidate, u32)> {
    let mut best: Option<(Candidate, u32)> = None;
    for candidate in candidates {
        let score = score_candidate(candidate, policy);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((*candidate, score));
        }
    }
    best
}
