use crate::commands::{JoinGame, JoinGameHandler, MakeGuess, MakeGuessHandler};
use crate::requests::Request;
use crate::responses::{GameView, Response};
use domain::{GameId, Games};
use rand::Rng;
use shared::{AppError, Config};
use tracing::{error, info, warn};

/// リクエストをコマンドに変換して実行する
pub struct CommandHandler<G: Games> {
    games: G,
    config: Config,
}

impl<G: Games> CommandHandler<G> {
    pub fn new(games: G, config: Config) -> Self {
        Self { games, config }
    }

    pub fn games(&self) -> &G {
        &self.games
    }

    /// リクエスト1行を処理してレスポンスを返す
    pub fn handle_line(&self, line: &str) -> Response {
        let result = Request::parse(line)
            .and_then(|request| self.execute(request, &mut rand::thread_rng()));

        match result {
            Ok(view) => Response::ok(view),
            Err(e) if e.is_client_error() => {
                warn!(code = e.error_code(), "リクエスト拒否: {}", e);
                Response::error(&e)
            }
            Err(e) => {
                error!(code = e.error_code(), "リクエスト処理エラー: {}", e);
                Response::error(&e)
            }
        }
    }

    /// リクエストを実行
    pub fn execute<R: Rng + ?Sized>(
        &self,
        request: Request,
        rng: &mut R,
    ) -> Result<GameView, AppError> {
        info!("コマンド実行: command={}", request.name());

        match request {
            Request::JoinGame {
                game_id,
                secret,
                total_attempts,
                available_pegs,
            } => {
                let game_id = game_id.unwrap_or_default();
                let total_attempts = total_attempts.unwrap_or(self.config.total_attempts);
                let available_pegs =
                    available_pegs.unwrap_or_else(|| self.config.available_pegs.clone());

                let command = match secret {
                    Some(secret) => JoinGame {
                        game_id,
                        secret,
                        total_attempts,
                        available_pegs,
                    },
                    None => JoinGame::with_random_secret(
                        rng,
                        game_id,
                        self.config.code_length,
                        total_attempts,
                        available_pegs,
                    )?,
                };

                let state = JoinGameHandler::new(&self.games).handle(command)?;
                Ok(GameView::new(game_id, &state))
            }
            Request::MakeGuess { game_id, guess } => {
                let state =
                    MakeGuessHandler::new(&self.games).handle(MakeGuess { game_id, guess })?;
                Ok(GameView::new(game_id, &state))
            }
            Request::ShowGame { game_id } => self.show(&game_id),
        }
    }

    fn show(&self, game_id: &GameId) -> Result<GameView, AppError> {
        let game = self.games.get(game_id)?;
        Ok(GameView::new(game.id(), game.state()))
    }
}
