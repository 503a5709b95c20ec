use domain::{Code, GameId, GameState, Guess, Outcome, Peg};
use serde::{Deserialize, Serialize};
use shared::{AppError, ErrorResponse};
use std::collections::BTreeSet;

/// 直近のフィードバックの件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackView {
    pub exact: usize,
    pub partial: usize,
}

/// ゲームの表示用ビュー。シークレットは終了後のみ含める
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub game_id: GameId,
    pub outcome: Outcome,
    pub code_length: usize,
    pub total_attempts: u32,
    pub remaining_attempts: u32,
    pub available_pegs: BTreeSet<Peg>,
    pub guesses: Vec<Code>,
    pub feedback: FeedbackView,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<Code>,
}

impl GameView {
    pub fn new(game_id: GameId, state: &GameState) -> Self {
        Self {
            game_id,
            outcome: state.outcome(),
            code_length: state.secret().len(),
            total_attempts: state.total_attempts(),
            remaining_attempts: state.remaining_attempts(),
            available_pegs: state.available_pegs().clone(),
            guesses: state.guesses().iter().map(Guess::code).cloned().collect(),
            feedback: FeedbackView {
                exact: state.feedback().exact_hits(),
                partial: state.feedback().partial_hits(),
            },
            secret: state
                .outcome()
                .is_finished()
                .then(|| state.secret().clone()),
        }
    }
}

/// 1行分のJSONレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok { game: GameView },
    Error(ErrorResponse),
}

impl Response {
    pub fn ok(game: GameView) -> Self {
        Response::Ok { game }
    }

    pub fn error(error: &AppError) -> Self {
        Response::Error(ErrorResponse::from_app_error(error))
    }
}
