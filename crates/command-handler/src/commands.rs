use domain::{Code, DomainError, Game, GameId, GameState, Games, Peg};
use rand::seq::SliceRandom;
use rand::Rng;
use shared::AppError;
use std::collections::BTreeSet;
use tracing::info;

/// ゲーム参加コマンド
#[derive(Debug, Clone, PartialEq)]
pub struct JoinGame {
    pub game_id: GameId,
    pub secret: Code,
    pub total_attempts: u32,
    pub available_pegs: BTreeSet<Peg>,
}

impl JoinGame {
    /// 利用可能なペグから一様にシークレットを選んでコマンドを作成
    pub fn with_random_secret<R: Rng + ?Sized>(
        rng: &mut R,
        game_id: GameId,
        code_length: usize,
        total_attempts: u32,
        available_pegs: BTreeSet<Peg>,
    ) -> Result<Self, AppError> {
        let choices: Vec<&Peg> = available_pegs.iter().collect();
        let secret = (0..code_length)
            .map(|_| choices.choose(&mut *rng).map(|peg| (*peg).clone()))
            .collect::<Option<Code>>()
            .ok_or_else(|| {
                AppError::Validation("available pegs cannot be empty".to_string())
            })?;

        Ok(Self {
            game_id,
            secret,
            total_attempts,
            available_pegs,
        })
    }
}

/// 推測コマンド
#[derive(Debug, Clone, PartialEq)]
pub struct MakeGuess {
    pub game_id: GameId,
    pub guess: Code,
}

pub struct JoinGameHandler<'a, G: Games + ?Sized> {
    games: &'a G,
}

impl<'a, G: Games + ?Sized> JoinGameHandler<'a, G> {
    pub fn new(games: &'a G) -> Self {
        Self { games }
    }

    /// ゲームを開始して保存し、開始直後の状態を返す
    pub fn handle(&self, command: JoinGame) -> Result<GameState, DomainError> {
        let game = Game::start(
            command.game_id,
            command.secret,
            command.total_attempts,
            command.available_pegs,
        )?;
        let state = game.state().clone();
        self.games.add(game)?;
        Ok(state)
    }
}

pub struct MakeGuessHandler<'a, G: Games + ?Sized> {
    games: &'a G,
}

impl<'a, G: Games + ?Sized> MakeGuessHandler<'a, G> {
    pub fn new(games: &'a G) -> Self {
        Self { games }
    }

    /// 推測を採点し、勝敗を判定して保存する
    ///
    /// 全ペグが位置一致なら勝利、そうでなく試行回数を使い切っていれば敗北。
    pub fn handle(&self, command: MakeGuess) -> Result<GameState, DomainError> {
        let mut game = self.games.get(&command.game_id)?;

        game.guess(command.guess)?;

        if game.total_hits() == game.secret().len() {
            game.win();
        } else if game.remaining_attempts() == 0 {
            game.lose();
        }

        info!(
            "推測完了: game_id={}, guesses={}, outcome={}",
            game.id(),
            game.total_guesses(),
            game.outcome()
        );

        let state = game.state().clone();
        self.games.add(game)?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure::GamesInMemory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pegs() -> BTreeSet<Peg> {
        Code::from_names(["Red", "Green", "Blue"]).to_set()
    }

    #[test]
    fn test_random_secret_uses_available_pegs() {
        let mut rng = StdRng::seed_from_u64(7);
        let command =
            JoinGame::with_random_secret(&mut rng, GameId::new(), 5, 10, pegs()).unwrap();

        assert_eq!(command.secret.len(), 5);
        assert!(command.secret.pegs_outside(&pegs()).is_empty());
        assert_eq!(command.total_attempts, 10);
    }

    #[test]
    fn test_random_secret_requires_pegs() {
        let mut rng = StdRng::seed_from_u64(7);
        let result =
            JoinGame::with_random_secret(&mut rng, GameId::new(), 4, 10, BTreeSet::new());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_win_takes_precedence_on_last_attempt() {
        let games = GamesInMemory::new();
        let game_id = GameId::new();
        JoinGameHandler::new(&games)
            .handle(JoinGame {
                game_id,
                secret: Code::from_names(["Red", "Blue"]),
                total_attempts: 1,
                available_pegs: pegs(),
            })
            .unwrap();

        let state = MakeGuessHandler::new(&games)
            .handle(MakeGuess {
                game_id,
                guess: Code::from_names(["Red", "Blue"]),
            })
            .unwrap();

        assert_eq!(state.outcome(), domain::Outcome::Won);
        // 勝利イベントのみが記録される
        assert_eq!(games.get(&game_id).unwrap().version(), 3);
    }

    #[test]
    fn test_lose_after_last_attempt() {
        let games = GamesInMemory::new();
        let game_id = GameId::new();
        JoinGameHandler::new(&games)
            .handle(JoinGame {
                game_id,
                secret: Code::from_names(["Red", "Blue"]),
                total_attempts: 2,
                available_pegs: pegs(),
            })
            .unwrap();

        let miss = || MakeGuess {
            game_id,
            guess: Code::from_names(["Green", "Green"]),
        };

        let first = MakeGuessHandler::new(&games).handle(miss()).unwrap();
        assert_eq!(first.outcome(), domain::Outcome::InProgress);
        assert_eq!(first.remaining_attempts(), 1);

        let second = MakeGuessHandler::new(&games).handle(miss()).unwrap();
        assert_eq!(second.outcome(), domain::Outcome::Lost);
        assert_eq!(second.remaining_attempts(), 0);
    }

    #[test]
    fn test_join_again_replaces_game() {
        let games = GamesInMemory::new();
        let game_id = GameId::new();
        let join = |secret: [&str; 2]| {
            JoinGameHandler::new(&games).handle(JoinGame {
                game_id,
                secret: Code::from_names(secret),
                total_attempts: 3,
                available_pegs: pegs(),
            })
        };

        join(["Red", "Red"]).unwrap();
        MakeGuessHandler::new(&games)
            .handle(MakeGuess {
                game_id,
                guess: Code::from_names(["Blue", "Blue"]),
            })
            .unwrap();

        let state = join(["Green", "Blue"]).unwrap();
        assert_eq!(state.secret(), &Code::from_names(["Green", "Blue"]));

        let stored = games.get(&game_id).unwrap();
        assert_eq!(stored.secret(), &Code::from_names(["Green", "Blue"]));
        assert!(stored.guesses().is_empty());
    }

    #[test]
    fn test_failed_guess_is_not_saved() {
        let games = GamesInMemory::new();
        let game_id = GameId::new();
        JoinGameHandler::new(&games)
            .handle(JoinGame {
                game_id,
                secret: Code::from_names(["Red", "Blue"]),
                total_attempts: 3,
                available_pegs: pegs(),
            })
            .unwrap();

        let result = MakeGuessHandler::new(&games).handle(MakeGuess {
            game_id,
            guess: Code::from_names(["Red"]),
        });

        assert!(matches!(
            result,
            Err(DomainError::GuessLengthInvalid { .. })
        ));
        assert_eq!(games.get(&game_id).unwrap().version(), 1);
    }
}
