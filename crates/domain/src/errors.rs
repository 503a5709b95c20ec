use crate::code::Peg;
use crate::game::Outcome;
use crate::identifiers::GameId;
use std::fmt;
use thiserror::Error;

/// 推測の長さがシークレットと一致しない方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMismatch {
    TooShort,
    TooLong,
}

impl fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthMismatch::TooShort => write!(f, "too short"),
            LengthMismatch::TooLong => write!(f, "too long"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Game not found: {0}")]
    GameNotFound(GameId),

    #[error("Game is finished: {0}")]
    GameFinished(Outcome),

    #[error("Guess {mismatch}: expected {expected} pegs, got {actual}")]
    GuessLengthInvalid {
        mismatch: LengthMismatch,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid pegs: {}", format_pegs(.0))]
    InvalidPeg(Vec<Peg>),

    #[error("Invalid GameId: {0}")]
    InvalidGameId(String),

    #[error("Invalid event data: {0}")]
    InvalidEvent(String),

    #[error("Event serialization error: {0}")]
    EventSerialization(String),

    #[error("Event deserialization error: {0}")]
    EventDeserialization(String),

    #[error("Concurrent modification detected: expected version {expected}, found {actual}")]
    ConcurrentModification { expected: u64, actual: u64 },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// 推測の長さエラーを作成（長さが一致する場合は None）
    pub fn guess_length(expected: usize, actual: usize) -> Option<Self> {
        let mismatch = match actual.cmp(&expected) {
            std::cmp::Ordering::Less => LengthMismatch::TooShort,
            std::cmp::Ordering::Greater => LengthMismatch::TooLong,
            std::cmp::Ordering::Equal => return None,
        };
        Some(DomainError::GuessLengthInvalid {
            mismatch,
            expected,
            actual,
        })
    }
}

fn format_pegs(pegs: &[Peg]) -> String {
    pegs.iter()
        .map(Peg::name)
        .collect::<Vec<_>>()
        .join(", ")
}
