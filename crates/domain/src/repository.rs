use crate::errors::DomainError;
use crate::game::Game;
use crate::identifiers::GameId;

/// ゲーム集約の保存先
///
/// 同じゲームIDへの変更は一度に1つだけ行われる前提。`add` は
/// [`Game::committed_version`] と保存済みのバージョンが一致しない場合に
/// [`DomainError::ConcurrentModification`] を返す。
pub trait Games {
    /// ゲームを取得（存在しない場合は [`DomainError::GameNotFound`]）
    fn get(&self, game_id: &GameId) -> Result<Game, DomainError>;

    /// ゲームを保存（IDによる upsert）
    fn add(&self, game: Game) -> Result<(), DomainError>;
}
