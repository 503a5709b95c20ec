use crate::optimistic_lock::{check_version, read, write};
use domain::{DomainError, Game, GameId, Games};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// ゲーム集約をそのままメモリに保持するリポジトリ
#[derive(Debug, Default)]
pub struct GamesInMemory {
    storage: RwLock<HashMap<GameId, Game>>,
}

impl GamesInMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Games for GamesInMemory {
    fn get(&self, game_id: &GameId) -> Result<Game, DomainError> {
        read(&self.storage)?
            .get(game_id)
            .cloned()
            .ok_or(DomainError::GameNotFound(*game_id))
    }

    fn add(&self, mut game: Game) -> Result<(), DomainError> {
        let mut storage = write(&self.storage)?;
        // 未保存のゲームは同じIDのゲームを置き換える
        if game.committed_version() > 0 {
            let stored_version = storage.get(&game.id()).map_or(0, Game::version);
            check_version(game.committed_version(), stored_version)?;
        }

        game.mark_committed();
        debug!(
            "ゲーム保存: game_id={}, version={}",
            game.id(),
            game.version()
        );
        storage.insert(game.id(), game);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Code, Outcome};

    fn new_game() -> Game {
        Game::start(
            GameId::new(),
            Code::from_names(["Red", "Green"]),
            3,
            Code::from_names(["Red", "Green", "Blue"]).to_set(),
        )
        .unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let games = GamesInMemory::new();
        let game = new_game();
        let game_id = game.id();

        games.add(game).unwrap();

        let loaded = games.get(&game_id).unwrap();
        assert_eq!(loaded.id(), game_id);
        assert_eq!(loaded.outcome(), Outcome::InProgress);
        assert_eq!(loaded.committed_version(), 1);
    }

    #[test]
    fn test_get_missing_game() {
        let games = GamesInMemory::new();
        let game_id = GameId::new();
        assert_eq!(
            games.get(&game_id).unwrap_err(),
            DomainError::GameNotFound(game_id)
        );
    }

    #[test]
    fn test_add_upserts() {
        let games = GamesInMemory::new();
        let game = new_game();
        let game_id = game.id();
        games.add(game).unwrap();

        let mut loaded = games.get(&game_id).unwrap();
        loaded.guess(Code::from_names(["Blue", "Blue"])).unwrap();
        games.add(loaded).unwrap();

        let reloaded = games.get(&game_id).unwrap();
        assert_eq!(reloaded.total_guesses(), 1);
        assert_eq!(reloaded.committed_version(), 2);
    }

    #[test]
    fn test_new_game_replaces_stored_game() {
        let games = GamesInMemory::new();
        let game = new_game();
        let game_id = game.id();
        games.add(game).unwrap();

        let mut loaded = games.get(&game_id).unwrap();
        loaded.guess(Code::from_names(["Blue", "Blue"])).unwrap();
        games.add(loaded).unwrap();

        // 同じIDで開始し直したゲームで上書きされる
        let restarted = Game::start(
            game_id,
            Code::from_names(["Blue", "Red"]),
            5,
            Code::from_names(["Red", "Green", "Blue"]).to_set(),
        )
        .unwrap();
        games.add(restarted).unwrap();

        let reloaded = games.get(&game_id).unwrap();
        assert_eq!(reloaded.secret(), &Code::from_names(["Blue", "Red"]));
        assert_eq!(reloaded.total_attempts(), 5);
        assert_eq!(reloaded.total_guesses(), 0);
        assert_eq!(reloaded.committed_version(), 1);
    }

    #[test]
    fn test_stale_copy_is_rejected() {
        let games = GamesInMemory::new();
        let game = new_game();
        let game_id = game.id();
        games.add(game).unwrap();

        let mut first = games.get(&game_id).unwrap();
        let mut second = games.get(&game_id).unwrap();

        first.guess(Code::from_names(["Blue", "Blue"])).unwrap();
        games.add(first).unwrap();

        // 同じバージョンから派生した変更は後勝ちにしない
        second.guess(Code::from_names(["Red", "Red"])).unwrap();
        assert_eq!(
            games.add(second),
            Err(DomainError::ConcurrentModification {
                expected: 1,
                actual: 2
            })
        );
        assert_eq!(games.get(&game_id).unwrap().total_guesses(), 1);
    }
}
