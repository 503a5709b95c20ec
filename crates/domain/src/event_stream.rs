use crate::events::GameEvent;
use crate::identifiers::StreamId;
use serde::{Deserialize, Serialize};

/// ゲームIDをキーとする追記専用のイベント列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStream {
    identifier: StreamId,
    events: Vec<GameEvent>,
}

impl EventStream {
    /// 空のストリームを作成
    pub fn create(identifier: StreamId) -> Self {
        Self {
            identifier,
            events: Vec::new(),
        }
    }

    /// 永続化済みのイベントからストリームを復元
    pub fn from_events(identifier: StreamId, events: Vec<GameEvent>) -> Self {
        Self { identifier, events }
    }

    pub fn identifier(&self) -> &StreamId {
        &self.identifier
    }

    /// イベントを末尾に追加する（既存のイベントは変更しない）
    pub fn append(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// 指定位置以降のイベント
    pub fn events_since(&self, version: u64) -> &[GameEvent] {
        let start = usize::try_from(version)
            .unwrap_or(usize::MAX)
            .min(self.events.len());
        &self.events[start..]
    }

    /// ストリームのバージョン（イベント数）
    pub fn version(&self) -> u64 {
        self.events.len() as u64
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a EventStream {
    type Item = &'a GameEvent;
    type IntoIter = std::slice::Iter<'a, GameEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
