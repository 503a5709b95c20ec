use crate::errors::AppError;
use domain::{Code, Peg};
use std::collections::BTreeSet;
use std::env;

const DEFAULT_TOTAL_ATTEMPTS: u32 = 12;
const DEFAULT_CODE_LENGTH: usize = 4;
const DEFAULT_AVAILABLE_PEGS: &str = "Red,Green,Blue,Yellow,Purple,Pink";

/// ゲームの保存方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// 集約をそのまま保持
    Memory,
    /// イベントを追記保存し、取得時に再生
    EventStore,
}

/// ログの出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub total_attempts: u32,
    pub code_length: usize,
    pub available_pegs: BTreeSet<Peg>,
    pub store: StoreKind,
    pub log_format: LogFormat,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            total_attempts: DEFAULT_TOTAL_ATTEMPTS,
            code_length: DEFAULT_CODE_LENGTH,
            available_pegs: parse_pegs(DEFAULT_AVAILABLE_PEGS),
            store: StoreKind::EventStore,
            log_format: LogFormat::Json,
            environment: "dev".to_string(),
        }
    }
}

impl Config {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// キーから値を引く関数を使って設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let total_attempts = match lookup("MASTERMIND_TOTAL_ATTEMPTS") {
            Some(value) => parse_positive("MASTERMIND_TOTAL_ATTEMPTS", &value)?,
            None => defaults.total_attempts,
        };

        let code_length = match lookup("MASTERMIND_CODE_LENGTH") {
            Some(value) => parse_positive("MASTERMIND_CODE_LENGTH", &value)?,
            None => defaults.code_length,
        };

        let available_pegs = match lookup("MASTERMIND_AVAILABLE_PEGS") {
            Some(value) => {
                let pegs = parse_pegs(&value);
                if pegs.is_empty() {
                    return Err(AppError::Configuration(
                        "MASTERMIND_AVAILABLE_PEGS must name at least one peg".to_string(),
                    ));
                }
                pegs
            }
            None => defaults.available_pegs,
        };

        let store = match lookup("MASTERMIND_STORE").as_deref() {
            None | Some("event-store") => StoreKind::EventStore,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                return Err(AppError::Configuration(format!(
                    "MASTERMIND_STORE must be 'memory' or 'event-store', got '{other}'"
                )))
            }
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(AppError::Configuration(format!(
                    "LOG_FORMAT must be 'json' or 'pretty', got '{other}'"
                )))
            }
        };

        Ok(Config {
            total_attempts,
            code_length,
            available_pegs,
            store,
            log_format,
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
        })
    }
}

fn parse_pegs(value: &str) -> BTreeSet<Peg> {
    Code::from_names(
        value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty()),
    )
    .to_set()
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(AppError::Configuration(format!(
            "{key} must be a positive integer, got '{value}'"
        ))),
    }
}
