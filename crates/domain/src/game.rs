use crate::code::{Code, Guess, Peg};
use crate::errors::DomainError;
use crate::event_stream::EventStream;
use crate::events::GameEvent;
use crate::feedback::Feedback;
use crate::identifiers::{GameId, StreamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info, warn};

/// ゲームの進行状況
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    /// 終了状態（WON / LOST）かチェック
    pub fn is_finished(&self) -> bool {
        matches!(self, Outcome::Won | Outcome::Lost)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::NotStarted => "NOT_STARTED",
            Outcome::InProgress => "IN_PROGRESS",
            Outcome::Won => "WON",
            Outcome::Lost => "LOST",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// イベント列を畳み込んで得られるゲームの状態
///
/// 状態を変更するのは [`GameState::apply`] のみ。同じイベント列を空の状態から
/// 再生すれば、常に同じ状態が得られる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    secret: Code,
    available_pegs: BTreeSet<Peg>,
    total_attempts: u32,
    guesses: Vec<Guess>,
    feedback: Feedback,
    outcome: Outcome,
}

impl GameState {
    /// イベントを1件適用した新しい状態を返す
    ///
    /// 進行状況は NOT_STARTED → IN_PROGRESS → WON/LOST の一方向にしか進まない。
    /// 遷移が定義されていない状態で届いた GameStarted / GameWon / GameLost は
    /// 進行状況を変えない。
    pub fn apply(mut self, event: &GameEvent) -> Self {
        match event {
            GameEvent::GameStarted {
                secret,
                total_attempts,
                available_pegs,
                ..
            } => {
                if self.outcome == Outcome::NotStarted {
                    self.secret = secret.clone();
                    self.total_attempts = *total_attempts;
                    self.available_pegs = available_pegs.clone();
                    self.outcome = Outcome::InProgress;
                }
            }
            GameEvent::GuessMade {
                guess, feedback, ..
            } => {
                self.guesses.push(guess.clone());
                self.feedback = feedback.clone();
            }
            GameEvent::GameWon { .. } => {
                if self.outcome == Outcome::InProgress {
                    self.outcome = Outcome::Won;
                }
            }
            GameEvent::GameLost { .. } => {
                if self.outcome == Outcome::InProgress {
                    self.outcome = Outcome::Lost;
                }
            }
        }
        self
    }

    /// 空の状態からイベント列を再生する
    pub fn replay<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a GameEvent>,
    {
        events.into_iter().fold(Self::default(), Self::apply)
    }

    pub fn secret(&self) -> &Code {
        &self.secret
    }

    pub fn available_pegs(&self) -> &BTreeSet<Peg> {
        &self.available_pegs
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    /// 直近の推測に対するフィードバック
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// 残りの試行回数
    pub fn remaining_attempts(&self) -> u32 {
        let used = u32::try_from(self.guesses.len()).unwrap_or(u32::MAX);
        self.total_attempts.saturating_sub(used)
    }
}

/// ゲーム集約
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    id: GameId,
    stream: EventStream,
    state: GameState,
    committed_version: u64,
}

impl Game {
    /// 新しいゲームを開始する
    pub fn start(
        game_id: GameId,
        secret: Code,
        total_attempts: u32,
        available_pegs: BTreeSet<Peg>,
    ) -> Result<Self, DomainError> {
        let invalid = secret.pegs_outside(&available_pegs);
        if !invalid.is_empty() {
            warn!("シークレットに利用できないペグ: game_id={}", game_id);
            return Err(DomainError::InvalidPeg(invalid));
        }

        let mut game = Self {
            id: game_id,
            stream: EventStream::create(StreamId::from(game_id)),
            state: GameState::default(),
            committed_version: 0,
        };
        game.record(GameEvent::new_game_started(
            secret,
            total_attempts,
            available_pegs,
        ));

        info!(
            "ゲーム開始: game_id={}, code_length={}, total_attempts={}",
            game_id,
            game.secret().len(),
            total_attempts
        );
        Ok(game)
    }

    /// 永続化されたイベントストリームからゲームを復元する
    pub fn from_stream(stream: EventStream) -> Result<Self, DomainError> {
        let id = stream.identifier().game_id()?;

        match stream.events().first() {
            Some(GameEvent::GameStarted { .. }) => {}
            Some(other) => {
                return Err(DomainError::InvalidEvent(format!(
                    "Stream {} must begin with game_started, found {}",
                    stream.identifier(),
                    other.event_type()
                )));
            }
            None => {
                return Err(DomainError::InvalidEvent(format!(
                    "Stream {} is empty",
                    stream.identifier()
                )));
            }
        }

        let state = GameState::replay(&stream);
        let committed_version = stream.version();
        debug!(
            "ゲーム復元: game_id={}, events={}, outcome={}",
            id,
            committed_version,
            state.outcome()
        );

        Ok(Self {
            id,
            stream,
            state,
            committed_version,
        })
    }

    /// 推測を採点して記録する
    ///
    /// 勝敗の判定は行わない。失敗した場合、状態は一切変更されない。
    pub fn guess(&mut self, code: Code) -> Result<Feedback, DomainError> {
        self.validate_guess(&code)?;

        let feedback = Feedback::score(self.state.secret(), &code);
        self.record(GameEvent::new_guess_made(
            Guess::new(code),
            feedback.clone(),
        ));

        debug!(
            "推測を採点: game_id={}, exact={}, partial={}, guesses={}",
            self.id,
            feedback.exact_hits(),
            feedback.partial_hits(),
            self.total_guesses()
        );
        Ok(feedback)
    }

    pub fn win(&mut self) {
        self.record(GameEvent::new_game_won());
        info!("ゲーム勝利: game_id={}", self.id);
    }

    pub fn lose(&mut self) {
        self.record(GameEvent::new_game_lost());
        info!("ゲーム敗北: game_id={}", self.id);
    }

    /// 直近のフィードバックの EXACT 数
    pub fn total_hits(&self) -> usize {
        self.state.feedback().exact_hits()
    }

    pub fn total_guesses(&self) -> usize {
        self.state.guesses().len()
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.state.remaining_attempts()
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn secret(&self) -> &Code {
        self.state.secret()
    }

    pub fn available_pegs(&self) -> &BTreeSet<Peg> {
        self.state.available_pegs()
    }

    pub fn total_attempts(&self) -> u32 {
        self.state.total_attempts()
    }

    pub fn guesses(&self) -> &[Guess] {
        self.state.guesses()
    }

    pub fn feedback(&self) -> &Feedback {
        self.state.feedback()
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn event_stream(&self) -> &EventStream {
        &self.stream
    }

    /// ストリームのバージョン（記録済みイベント数）
    pub fn version(&self) -> u64 {
        self.stream.version()
    }

    /// 永続化済みとみなすバージョン
    pub fn committed_version(&self) -> u64 {
        self.committed_version
    }

    /// まだ永続化されていないイベント
    pub fn uncommitted_events(&self) -> &[GameEvent] {
        self.stream.events_since(self.committed_version)
    }

    /// すべてのイベントを永続化済みにする
    pub fn mark_committed(&mut self) {
        self.committed_version = self.stream.version();
    }

    fn record(&mut self, event: GameEvent) {
        self.state = std::mem::take(&mut self.state).apply(&event);
        self.stream.append(event);
    }

    fn validate_guess(&self, code: &Code) -> Result<(), DomainError> {
        let outcome = self.outcome();
        if outcome != Outcome::InProgress {
            return Err(DomainError::GameFinished(outcome));
        }

        if let Some(error) = DomainError::guess_length(self.secret().len(), code.len()) {
            return Err(error);
        }

        let invalid = code.pegs_outside(self.available_pegs());
        if !invalid.is_empty() {
            return Err(DomainError::InvalidPeg(invalid));
        }

        Ok(())
    }
}
