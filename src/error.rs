use std::path::PathBuf;

/// Errors a strategy can report when asked for a move.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StrategyError {
    #[error("no legal move: every column is full")]
    NoLegalMove,

    #[error("search finished without selecting a column")]
    SearchFailed,

    #[error("waiting for an externally supplied column")]
    AwaitingInput,

    #[error("column {col} is not playable on a board with {cols} columns")]
    InvalidColumn { col: usize, cols: usize },

    #[error("agent is bound to {expected}-column boards, got {found} columns")]
    BoardWidthMismatch { expected: usize, found: usize },
}

/// Errors that can occur during training.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("agent selected illegal action {action} (legal: {legal:?})")]
    IllegalAction { action: usize, legal: Vec<usize> },

    #[error("game should be terminal but has no outcome")]
    MissingOutcome,

    #[error("both agents play {0:?}")]
    SameSide(crate::game::Player),

    #[error("invalid board size {rows}x{cols}")]
    InvalidBoard { rows: usize, cols: usize },

    #[error("strategy error: {0}")]
    Strategy(#[from] StrategyError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_error_display() {
        let err = StrategyError::InvalidColumn { col: 9, cols: 7 };
        assert_eq!(
            err.to_string(),
            "column 9 is not playable on a board with 7 columns"
        );
        assert_eq!(
            StrategyError::NoLegalMove.to_string(),
            "no legal move: every column is full"
        );
    }

    #[test]
    fn test_training_error_display() {
        let err = TrainingError::IllegalAction {
            action: 5,
            legal: vec![0, 1, 2],
        };
        assert_eq!(
            err.to_string(),
            "agent selected illegal action 5 (legal: [0, 1, 2])"
        );
        assert_eq!(
            TrainingError::SameSide(crate::game::Player::Red).to_string(),
            "both agents play Red"
        );
        assert_eq!(
            TrainingError::InvalidBoard { rows: 0, cols: 7 }.to_string(),
            "invalid board size 0x7"
        );
        let err: TrainingError = StrategyError::SearchFailed.into();
        assert_eq!(
            err.to_string(),
            "strategy error: search finished without selecting a column"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("search.depth must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search.depth must be >= 1"
        );
    }
}
