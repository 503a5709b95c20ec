use domain::{Code, GameId, Peg};
use serde::Deserialize;
use shared::AppError;
use std::collections::BTreeSet;

/// 1行分のJSONリクエスト
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Request {
    /// 省略された項目は設定値で補う（シークレット省略時はランダム生成）
    JoinGame {
        game_id: Option<GameId>,
        secret: Option<Code>,
        total_attempts: Option<u32>,
        available_pegs: Option<BTreeSet<Peg>>,
    },
    MakeGuess {
        game_id: GameId,
        guess: Code,
    },
    ShowGame {
        game_id: GameId,
    },
}

impl Request {
    /// リクエスト行をパース
    pub fn parse(line: &str) -> Result<Self, AppError> {
        serde_json::from_str(line)
            .map_err(|e| AppError::Deserialization(format!("リクエストのパースエラー: {e}")))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Request::JoinGame { .. } => "join_game",
            Request::MakeGuess { .. } => "make_guess",
            Request::ShowGame { .. } => "show_game",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_make_guess() {
        let game_id = GameId::new();
        let line = format!(
            r#"{{"command":"make_guess","game_id":"{game_id}","guess":["Red","Blue"]}}"#
        );

        let request = Request::parse(&line).unwrap();
        assert_eq!(
            request,
            Request::MakeGuess {
                game_id,
                guess: Code::from_names(["Red", "Blue"]),
            }
        );
        assert_eq!(request.name(), "make_guess");
    }

    #[test]
    fn test_parse_minimal_join_game() {
        let request = Request::parse(r#"{"command":"join_game"}"#).unwrap();
        assert_eq!(
            request,
            Request::JoinGame {
                game_id: None,
                secret: None,
                total_attempts: None,
                available_pegs: None,
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        for line in [
            "not json",
            r#"{"command":"resign"}"#,
            r#"{"command":"make_guess","game_id":"abc","guess":[]}"#,
            r#"{"command":"show_game"}"#,
        ] {
            assert!(
                matches!(Request::parse(line), Err(AppError::Deserialization(_))),
                "expected parse error for {line}"
            );
        }
    }
}
