//! Search configuration.
//!
//! The free-placement game is solved exhaustively; the gravity game is
//! searched to a fixed horizon past which positions score as neutral.

/// Default Connect 4 horizon, in plies below the engine's own move.
pub const DEFAULT_CONNECT4_DEPTH: u32 = 5;

/// How the engine searches a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies explored below the root move before scoring a position as 0.
    /// `None` searches to the end of the game.
    pub depth_limit: Option<u32>,
    /// Enables alpha-beta cutoffs. Never changes the chosen move or score.
    pub pruning: bool,
    /// Checks for wins only through the last placed cell instead of
    /// rescanning the whole board at every node.
    pub incremental: bool,
}

impl SearchConfig {
    /// Full-depth minimax without pruning, as used for tic-tac-toe.
    pub fn exhaustive() -> Self {
        Self {
            depth_limit: None,
            pruning: false,
            incremental: false,
        }
    }

    /// Depth-bounded alpha-beta search, as used for Connect 4.
    pub fn bounded(depth: u32) -> Self {
        Self {
            depth_limit: Some(depth),
            pruning: true,
            incremental: false,
        }
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    pub fn with_depth_limit(mut self, depth_limit: Option<u32>) -> Self {
        self.depth_limit = depth_limit;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::bounded(DEFAULT_CONNECT4_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let exhaustive = SearchConfig::exhaustive();
        assert_eq!(exhaustive.depth_limit, None);
        assert!(!exhaustive.pruning);

        let bounded = SearchConfig::default();
        assert_eq!(bounded.depth_limit, Some(5));
        assert!(bounded.pruning);
        assert!(!bounded.incremental);
    }

    #[test]
    fn test_builders() {
        let cfg = SearchConfig::exhaustive()
            .with_pruning(true)
            .with_incremental(true)
            .with_depth_limit(Some(3));
        assert_eq!(
            cfg,
            SearchConfig {
                depth_limit: Some(3),
                pruning: true,
                incremental: true,
            }
        );
    }
}
