use anyhow::{anyhow, Context};
use command_handler::CommandHandler;
use domain::Games;
use infrastructure::{EventStoreGames, GamesInMemory};
use shared::{init_tracing, Config, StoreKind};
use std::io::{self, BufRead, Write};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("設定読み込みエラー")?;
    init_tracing(config.log_format).map_err(|e| anyhow!("トレーシング初期化エラー: {e}"))?;

    info!(
        "command-handler開始: environment={}, store={:?}",
        config.environment, config.store
    );

    match config.store {
        StoreKind::Memory => run(CommandHandler::new(GamesInMemory::new(), config)),
        StoreKind::EventStore => run(CommandHandler::new(EventStoreGames::new(), config)),
    }
}

/// 標準入力からリクエストを1行ずつ読み、レスポンスを標準出力に書く
fn run<G: Games>(handler: CommandHandler<G>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("標準入力の読み込みエラー")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handler.handle_line(&line);
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }

    info!("command-handler終了");
    Ok(())
}
