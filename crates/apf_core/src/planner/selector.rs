//! Greedy move selection with a potential veto.
//!
//! Runs exactly one round per candidate. Each round takes the highest
//! remaining fitness (first index wins ties). A candidate that lowers the
//! total potential is committed and stays eligible; one that does not has its
//! working fitness zeroed. The last commit in round order wins.

use serde::Serialize;

use super::scorer::Candidate;

/// Result of one selector pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Index of the last committed candidate, if any round accepted one
    pub committed: Option<usize>,
    /// Rounds that accepted a candidate
    pub commits: usize,
    /// Rounds that vetoed a candidate
    pub vetoes: usize,
}

impl Selection {
    pub fn found(&self) -> bool {
        self.committed.is_some()
    }
}

/// Index of the maximum value; the first occurrence wins ties.
fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some(b) if v <= values[b] => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Run the selector over scored candidates. Does not modify them.
pub fn select(candidates: &[Candidate]) -> Selection {
    let mut fitness: Vec<f64> = candidates.iter().map(|c| c.fitness).collect();
    let mut selection = Selection { committed: None, commits: 0, vetoes: 0 };

    for _ in 0..candidates.len() {
        let Some(k) = argmax(&fitness) else { break };
        if candidates[k].improves_cost() {
            selection.committed = Some(k);
            selection.commits += 1;
        } else {
            fitness[k] = 0.0;
            selection.vetoes += 1;
        }
    }

    selection
}
