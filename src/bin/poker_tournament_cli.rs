// src/bin/poker_tournament_cli.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use poker_tournament::api::{run_liveness, DEFAULT_BIND};
use poker_tournament::eval::EvaluatorKind;
use poker_tournament::infra::{
    init_logging, EventSink, FileStore, LogSink, PlayerStore, DEFAULT_LOG_FILE,
};
use poker_tournament::{ExecutionMode, TournamentConfig, TournamentRuntime, TournamentSnapshot};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Sequential,
    Cooperative,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EvaluatorArg {
    Reference,
    Standard,
}

/// Симуляция многостолового турнира на выбывание.
#[derive(Debug, Parser)]
#[command(name = "poker_tournament_cli", version)]
struct Args {
    /// JSON-конфиг турнира (недостающие поля берутся по умолчанию).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Переопределить число игроков.
    #[arg(long)]
    players: Option<u32>,

    /// Сид турнира для воспроизводимого прогона.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    #[arg(long, value_enum)]
    evaluator: Option<EvaluatorArg>,

    /// Каталог для состояния игроков и снимка турнира.
    #[arg(long, default_value = "player_states")]
    state_dir: PathBuf,

    /// Подтянуть сохранённое состояние игроков.
    #[arg(long)]
    load_previous_state: bool,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Адрес эндпоинта жизнеспособности.
    #[arg(long, default_value = DEFAULT_BIND)]
    bind: String,

    /// Продолжить турнир из снимка в state_dir.
    #[arg(long)]
    resume: bool,

    /// Куда дополнительно записать итоговый снимок турнира.
    #[arg(long)]
    snapshot_out: Option<PathBuf>,
}

fn build_config(args: &Args) -> anyhow::Result<TournamentConfig> {
    let mut config = match &args.config {
        Some(path) => TournamentConfig::from_file(path)?,
        None => TournamentConfig::default(),
    };
    if let Some(players) = args.players {
        config.num_players = players;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(mode) = args.mode {
        config.execution = match mode {
            ModeArg::Sequential => ExecutionMode::Sequential,
            ModeArg::Cooperative => ExecutionMode::Cooperative,
        };
    }
    if let Some(evaluator) = args.evaluator {
        config.evaluator = match evaluator {
            EvaluatorArg::Reference => EvaluatorKind::Reference,
            EvaluatorArg::Standard => EvaluatorKind::Standard,
        };
    }
    if args.load_previous_state {
        config.load_previous_state = true;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file, LevelFilter::Info).context("initialize logging")?;

    let mut store = FileStore::open(&args.state_dir).context("open state directory")?;
    let sink: Arc<dyn EventSink> = Arc::new(LogSink);

    let mut runtime = if args.resume {
        let snapshot = store.load_snapshot().context("load tournament snapshot")?;
        snapshot.into_runtime(sink)?
    } else {
        let config = build_config(&args)?;
        TournamentRuntime::setup_with_store(config, sink, &store)?
    };

    let server = run_liveness(&args.bind).context("start liveness endpoint")?;
    let handle = server.handle();
    let server_task = tokio::spawn(server);

    let outcome = runtime.run().await;

    handle.stop(true).await;
    if let Err(e) = server_task.await {
        log::warn!("liveness endpoint task failed: {e}");
    }

    let status = outcome?;
    log::info!("tournament ended: {}", status.label());

    let saved = runtime.save_players(&mut store);
    log::info!("saved state for {saved} players to {}", store.dir().display());

    let snapshot = TournamentSnapshot::from_runtime(&runtime);
    if let Err(e) = store.save_snapshot(&snapshot) {
        log::error!("cannot save tournament snapshot: {e}");
    }
    if let Some(path) = &args.snapshot_out {
        std::fs::write(path, snapshot.to_bytes()?)
            .with_context(|| format!("write snapshot to {}", path.display()))?;
    }

    println!("{}", runtime.report());
    Ok(())
}
