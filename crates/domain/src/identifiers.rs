use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// ゲームID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// 新しいゲームIDを生成
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 文字列からゲームIDを作成
    pub fn from_string(id: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|e| DomainError::InvalidGameId(format!("{id}: {e}")))
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// イベントID（生成時に一意、再利用しない）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// 新しいイベントIDを生成
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// イベントストリームの識別子。ゲームIDと同じ値から導出される
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(String);

impl StreamId {
    /// 元のゲームIDに戻す
    pub fn game_id(&self) -> Result<GameId, DomainError> {
        GameId::from_string(&self.0)
    }
}

impl From<GameId> for StreamId {
    fn from(game_id: GameId) -> Self {
        Self(game_id.to_string())
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
