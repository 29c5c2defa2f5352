//! # Minimax Search with Alpha-Beta Pruning
//!
//! Depth-first exploration of the game tree rooted at a live board. The
//! engine mutates the board in place while it searches: every hypothetical
//! move is wrapped in a [`Placement`] guard that undoes it when the guard
//! goes out of scope, so the board is returned cell-for-cell unchanged.
//!
//! Scores are from the point of view of the side the engine plays for:
//! a win found `p` plies below the root is worth `win_score - p`, a loss
//! `-(win_score - p)`, and a full board or the depth horizon is worth 0.

use crate::config::SearchConfig;
use crate::error::{GameError, Result};
use crate::{GameState, Location, Side};
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, trace};

/// The move chosen by a search and its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult<M> {
    pub mv: M,
    pub score: i32,
}

/// Counters gathered during the most recent search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Number of positions visited, root children included.
    pub total_nodes: u64,
    /// Number of times sibling moves were skipped by an alpha-beta cutoff.
    pub cutoffs: u64,
    /// Wall-clock time spent in the search.
    pub elapsed: Duration,
    /// Score of every root move, in enumeration order, keyed by position.
    pub root_scores: Vec<(usize, i32)>,
}

/// A move applied to a board for the duration of a scope.
///
/// Dropping the guard clears the filled cell, whichever way the scope exits.
struct Placement<'a, S: GameState> {
    state: &'a mut S,
    location: Location,
}

impl<'a, S: GameState> Placement<'a, S> {
    fn new(state: &'a mut S, mv: S::Move, side: Side) -> Result<Self> {
        let location = state.place(mv, side)?;
        Ok(Self { state, location })
    }
}

impl<S: GameState> Deref for Placement<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.state
    }
}

impl<S: GameState> DerefMut for Placement<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.state
    }
}

impl<S: GameState> Drop for Placement<'_, S> {
    fn drop(&mut self) {
        self.state.undo(self.location);
    }
}

/// Per-call search parameters threaded through the recursion.
#[derive(Clone, Copy)]
struct Frame {
    /// The side the engine is choosing a move for.
    me: Side,
    depth_limit: Option<u32>,
    incremental: bool,
}

/// The minimax engine.
///
/// The engine holds no board state between calls, only its configuration
/// and the statistics of the last search.
#[derive(Debug, Clone)]
pub struct Minimax {
    pruning: bool,
    incremental: bool,
    stats: SearchStatistics,
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Minimax {
    /// Creates an engine, with or without alpha-beta pruning.
    pub fn new(pruning: bool) -> Self {
        Self {
            pruning,
            incremental: false,
            stats: SearchStatistics::default(),
        }
    }

    /// Creates an engine from a [`SearchConfig`]. The depth limit stays a
    /// per-call argument of [`Minimax::choose_move`].
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            pruning: config.pruning,
            incremental: config.incremental,
            stats: SearchStatistics::default(),
        }
    }

    pub fn pruning(&self) -> bool {
        self.pruning
    }

    /// Statistics of the most recent call to [`Minimax::choose_move`].
    pub fn last_statistics(&self) -> &SearchStatistics {
        &self.stats
    }

    /// Chooses the best move for `side` on `state`.
    ///
    /// Every legal move is tried in the board's enumeration order and the
    /// first one reaching the best score wins, so identical inputs always
    /// yield identical results. `state` is borrowed mutably while the search
    /// runs and is restored before this returns.
    ///
    /// # Errors
    /// [`GameError::NoLegalMove`] if the board is already full.
    #[instrument(level = "debug", skip(self, state))]
    pub fn choose_move<S: GameState>(
        &mut self,
        state: &mut S,
        side: Side,
        depth_limit: Option<u32>,
    ) -> Result<SearchResult<S::Move>> {
        if state.is_full() {
            return Err(GameError::NoLegalMove);
        }

        let start = Instant::now();
        self.stats = SearchStatistics::default();
        let frame = Frame {
            me: side,
            depth_limit,
            // A win already on the board would not pass through any new cell.
            incremental: self.incremental && state.winner().is_none(),
        };

        let mut best: Option<SearchResult<S::Move>> = None;
        for mv in state.possible_moves() {
            let score = {
                let mut placed = Placement::new(state, mv, side)?;
                self.stats.total_nodes += 1;
                let last = placed.location;
                self.evaluate(&mut *placed, last, side.opponent(), 1, frame, i32::MIN, i32::MAX)
            };
            trace!(%mv, score, "root move scored");
            self.stats.root_scores.push((mv.into(), score));
            if best.map_or(true, |b| score > b.score) {
                best = Some(SearchResult { mv, score });
            }
        }

        self.stats.elapsed = start.elapsed();
        let result = best.ok_or(GameError::NoLegalMove)?;
        debug!(
            best = %result.mv,
            score = result.score,
            nodes = self.stats.total_nodes,
            cutoffs = self.stats.cutoffs,
            "search complete"
        );
        Ok(result)
    }

    /// Scores the position reached after `mover.opponent()` filled `last`.
    #[allow(clippy::too_many_arguments)]
    fn evaluate<S: GameState>(
        &mut self,
        state: &mut S,
        last: Location,
        mover: Side,
        ply: u32,
        frame: Frame,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        let win = state.win_score() - ply as i32;
        let (i_won, they_won) = if frame.incremental {
            let just_moved = mover.opponent();
            let won = state.has_won_through(last, just_moved);
            (won && just_moved == frame.me, won && just_moved != frame.me)
        } else {
            (state.has_won(frame.me), state.has_won(frame.me.opponent()))
        };
        if i_won {
            return win;
        }
        if they_won {
            return -win;
        }
        if state.is_full() || frame.depth_limit.is_some_and(|d| ply > d) {
            return 0;
        }

        let maximizing = mover == frame.me;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in state.possible_moves() {
            let value = {
                let Ok(mut placed) = Placement::new(state, mv, mover) else {
                    continue;
                };
                self.stats.total_nodes += 1;
                let location = placed.location;
                self.evaluate(&mut *placed, location, mover.opponent(), ply + 1, frame, alpha, beta)
            };
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if self.pruning && alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }
        best
    }
}
