use crate::code::{Code, Guess, Peg};
use crate::errors::DomainError;
use crate::feedback::Feedback;
use crate::identifiers::EventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 現在のイベントスキーマバージョン
pub const EVENT_VERSION: &str = "1.0";

/// ゲームのイベント列挙型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        event_id: EventId,
        secret: Code,
        total_attempts: u32,
        available_pegs: BTreeSet<Peg>,
        timestamp: DateTime<Utc>,
        #[serde(default = "default_version")]
        version: String,
    },
    GuessMade {
        event_id: EventId,
        guess: Guess,
        feedback: Feedback,
        timestamp: DateTime<Utc>,
        #[serde(default = "default_version")]
        version: String,
    },
    GameWon {
        event_id: EventId,
        timestamp: DateTime<Utc>,
        #[serde(default = "default_version")]
        version: String,
    },
    GameLost {
        event_id: EventId,
        timestamp: DateTime<Utc>,
        #[serde(default = "default_version")]
        version: String,
    },
}

fn default_version() -> String {
    EVENT_VERSION.to_string()
}

impl GameEvent {
    /// 新しいGameStartedイベントを作成
    pub fn new_game_started(
        secret: Code,
        total_attempts: u32,
        available_pegs: BTreeSet<Peg>,
    ) -> Self {
        GameEvent::GameStarted {
            event_id: EventId::generate(),
            secret,
            total_attempts,
            available_pegs,
            timestamp: Utc::now(),
            version: default_version(),
        }
    }

    /// 新しいGuessMadeイベントを作成
    pub fn new_guess_made(guess: Guess, feedback: Feedback) -> Self {
        GameEvent::GuessMade {
            event_id: EventId::generate(),
            guess,
            feedback,
            timestamp: Utc::now(),
            version: default_version(),
        }
    }

    pub fn new_game_won() -> Self {
        GameEvent::GameWon {
            event_id: EventId::generate(),
            timestamp: Utc::now(),
            version: default_version(),
        }
    }

    pub fn new_game_lost() -> Self {
        GameEvent::GameLost {
            event_id: EventId::generate(),
            timestamp: Utc::now(),
            version: default_version(),
        }
    }

    /// イベントIDを取得
    pub fn event_id(&self) -> &EventId {
        match self {
            GameEvent::GameStarted { event_id, .. } => event_id,
            GameEvent::GuessMade { event_id, .. } => event_id,
            GameEvent::GameWon { event_id, .. } => event_id,
            GameEvent::GameLost { event_id, .. } => event_id,
        }
    }

    /// イベントのタイムスタンプを取得
    pub fn timestamp(&self) -> &DateTime<Utc> {
        match self {
            GameEvent::GameStarted { timestamp, .. } => timestamp,
            GameEvent::GuessMade { timestamp, .. } => timestamp,
            GameEvent::GameWon { timestamp, .. } => timestamp,
            GameEvent::GameLost { timestamp, .. } => timestamp,
        }
    }

    pub fn version(&self) -> &str {
        match self {
            GameEvent::GameStarted { version, .. } => version,
            GameEvent::GuessMade { version, .. } => version,
            GameEvent::GameWon { version, .. } => version,
            GameEvent::GameLost { version, .. } => version,
        }
    }

    /// イベントタイプ名を取得
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::GameStarted { .. } => "game_started",
            GameEvent::GuessMade { .. } => "guess_made",
            GameEvent::GameWon { .. } => "game_won",
            GameEvent::GameLost { .. } => "game_lost",
        }
    }

    /// イベントをJSONにシリアライズ
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(self).map_err(|e| DomainError::EventSerialization(e.to_string()))
    }

    /// JSONからイベントをデシリアライズ
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| DomainError::EventDeserialization(e.to_string()))
    }
}
