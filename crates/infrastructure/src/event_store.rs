use crate::optimistic_lock::{check_version, read, write};
use domain::{DomainError, EventStream, Game, GameEvent, GameId, Games, StreamId};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, info};

/// イベントを JSON で追記保存し、取得時にイベントを再生してゲームを復元するリポジトリ
///
/// 保存済みのイベントは書き換えず、`add` では未保存のイベントだけを末尾に追加する。
/// 一度も保存されていないゲームは新しいストリームとして保存し、同じIDの既存ストリームを置き換える。
#[derive(Debug, Default)]
pub struct EventStoreGames {
    streams: RwLock<HashMap<StreamId, Vec<String>>>,
}

impl EventStoreGames {
    pub fn new() -> Self {
        Self::default()
    }

    /// ストリームに保存されたイベントを順に取得
    pub fn events(&self, game_id: &GameId) -> Result<Vec<GameEvent>, DomainError> {
        let stream_id = StreamId::from(*game_id);
        let streams = read(&self.streams)?;
        let records = streams
            .get(&stream_id)
            .ok_or(DomainError::GameNotFound(*game_id))?;

        records
            .iter()
            .map(|record| GameEvent::from_json(record))
            .collect()
    }
}

impl Games for EventStoreGames {
    fn get(&self, game_id: &GameId) -> Result<Game, DomainError> {
        let events = self.events(game_id)?;
        let stream = EventStream::from_events(StreamId::from(*game_id), events);
        Game::from_stream(stream)
    }

    fn add(&self, game: Game) -> Result<(), DomainError> {
        let stream_id = game.event_stream().identifier().clone();

        // 書き込み前にすべてシリアライズしておき、途中失敗で一部だけ残らないようにする
        let records = game
            .uncommitted_events()
            .iter()
            .map(|event| {
                debug!(
                    "イベント保存: event_id={}, event_type={}, schema_version={}, timestamp={}",
                    event.event_id(),
                    event.event_type(),
                    event.version(),
                    event.timestamp()
                );
                event.to_json()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut streams = write(&self.streams)?;

        if game.committed_version() == 0 {
            let replaced = streams.insert(stream_id, records).is_some();
            info!(
                "イベントストリーム作成: game_id={}, replaced={}",
                game.id(),
                replaced
            );
            return Ok(());
        }

        let stored_version = streams.get(&stream_id).map_or(0, |stored| stored.len() as u64);
        check_version(game.committed_version(), stored_version)?;

        let stored = streams.entry(stream_id).or_default();
        let appended = records.len();
        stored.extend(records);

        debug!(
            "イベント追記: game_id={}, appended={}, version={}",
            game.id(),
            appended,
            stored.len()
        );
        Ok(())
    }
}
