use clap::Parser;
use maze_chase::config::GameConfig;
use maze_chase::constants::DEFAULT_MAX_TICKS;
use maze_chase::engine::{Autopilot, GameEngine, PursuitMode};
use maze_chase::error::LoadError;
use maze_chase::input::InputScript;
use maze_chase::types::{Direction, GameOverReason, GameSummary, Snapshot};
use serde::Serialize;
use serde_json::{json, Value};
use std::error::Error;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// JSON game config; missing fields fall back to the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Plain text maze layout, one row per line.
    #[arg(long)]
    maze: Option<PathBuf>,
    /// JSON-lines input script: {"tick": N, "dir": "left"} per line.
    #[arg(long, conflicts_with = "autopilot")]
    script: Option<PathBuf>,
    #[arg(long)]
    autopilot: bool,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_parser = parse_pursuit)]
    pursuit: Option<PursuitMode>,
    #[arg(long)]
    cadence: Option<u32>,
    #[arg(long)]
    max_ticks: Option<u64>,
    #[arg(long)]
    run_id: Option<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
    /// Print a snapshot line for every tick before the result line.
    #[arg(long)]
    snapshots: bool,
}

enum Driver {
    Idle,
    Script(InputScript),
    Autopilot(Autopilot),
}

impl Driver {
    fn label(&self) -> &'static str {
        match self {
            Driver::Idle => "idle",
            Driver::Script(_) => "script",
            Driver::Autopilot(_) => "autopilot",
        }
    }

    fn inputs(&mut self, engine: &GameEngine) -> Vec<Direction> {
        match self {
            Driver::Idle => Vec::new(),
            Driver::Script(script) => script.inputs_at(engine.tick()).to_vec(),
            Driver::Autopilot(autopilot) => autopilot.decide(engine).into_iter().collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
struct RunResultLine {
    #[serde(rename = "runId")]
    run_id: String,
    seed: u64,
    driver: String,
    #[serde(rename = "pursuitMode")]
    pursuit_mode: PursuitMode,
    outcome: String,
    #[serde(flatten)]
    summary: GameSummary,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "runId")]
    run_id: String,
    #[serde(rename = "startedAtMs")]
    started_at_ms: u64,
    #[serde(rename = "finishedAtMs")]
    finished_at_ms: u64,
    config: GameConfig,
    result: RunResultLine,
}

#[derive(Clone, Debug, Serialize)]
struct StructuredLogLine {
    #[serde(rename = "timestampMs")]
    timestamp_ms: u64,
    level: String,
    event: String,
    #[serde(rename = "runId")]
    run_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tick: Option<u64>,
    details: Value,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let run_started_at_ms = now_ms();
    let seed = cli.seed.unwrap_or_else(rand::random::<u64>);
    let run_id = cli
        .run_id
        .clone()
        .unwrap_or_else(|| default_run_id(seed, run_started_at_ms));

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(error) => fail(&run_id, "config_load_failed", &error),
    };
    let mut engine = match GameEngine::new(config.clone()) {
        Ok(engine) => engine,
        Err(error) => fail(&run_id, "config_invalid", &error),
    };
    let mut driver = match resolve_driver(&cli, seed) {
        Ok(driver) => driver,
        Err(error) => fail(&run_id, "script_load_failed", &error),
    };
    let max_ticks = cli.max_ticks.unwrap_or(DEFAULT_MAX_TICKS);

    emit_log(
        "info",
        "run_started",
        &run_id,
        None,
        json!({
            "seed": seed,
            "driver": driver.label(),
            "pursuitMode": config.pursuit_mode,
            "pursuerCadence": config.pursuer_cadence,
            "maxTicks": max_ticks,
            "world": engine.get_world_init(),
        }),
    );

    run_game(&mut engine, &mut driver, max_ticks, |snapshot| {
        if cli.snapshots {
            print_json_line(&run_id, snapshot);
        }
    });

    if !engine.is_ended() {
        emit_log(
            "warn",
            "tick_limit_reached",
            &run_id,
            Some(engine.tick()),
            json!({
                "maxTicks": max_ticks,
                "pickupsLeft": engine.pickups().len(),
            }),
        );
    }

    let summary = engine.build_summary();
    let result = RunResultLine {
        run_id: run_id.clone(),
        seed,
        driver: driver.label().to_string(),
        pursuit_mode: config.pursuit_mode,
        outcome: outcome_key(summary.reason),
        summary,
    };
    print_json_line(&run_id, &result);

    let mut summary_out_written: Option<String> = None;
    if let Some(path) = cli.summary_out.as_ref() {
        let run_summary = RunSummary {
            run_id: run_id.clone(),
            started_at_ms: run_started_at_ms,
            finished_at_ms: now_ms(),
            config,
            result: result.clone(),
        };
        if let Err(error) = write_summary(path, &run_summary) {
            emit_log(
                "error",
                "summary_write_failed",
                &run_id,
                None,
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
        summary_out_written = Some(path.to_string_lossy().to_string());
    }

    emit_log(
        "info",
        "run_finished",
        &run_id,
        Some(engine.tick()),
        json!({
            "outcome": result.outcome,
            "durationMs": result.summary.duration_ms,
            "pickupsCollected": result.summary.pickups_collected,
            "pickupsTotal": result.summary.pickups_total,
            "summaryOut": summary_out_written,
        }),
    );
}

fn run_game(
    engine: &mut GameEngine,
    driver: &mut Driver,
    max_ticks: u64,
    mut on_snapshot: impl FnMut(&Snapshot),
) {
    while !engine.is_ended() && engine.tick() < max_ticks {
        for dir in driver.inputs(engine) {
            engine.submit_input(dir);
        }
        engine.step();
        let snapshot = engine.build_snapshot(true);
        on_snapshot(&snapshot);
    }
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, LoadError> {
    let mut config = match cli.config.as_deref() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(path) = cli.maze.as_deref() {
        config = config.with_maze_text(&read_text(path)?);
    }
    if let Some(mode) = cli.pursuit {
        config.pursuit_mode = mode;
    }
    if let Some(cadence) = cli.cadence {
        config.pursuer_cadence = cadence;
    }
    Ok(config)
}

fn resolve_driver(cli: &Cli, seed: u64) -> Result<Driver, LoadError> {
    if let Some(path) = cli.script.as_deref() {
        let script = InputScript::from_text(&read_text(path)?);
        if script.is_empty() {
            log::warn!("input script {} has no usable lines", path.display());
        }
        return Ok(Driver::Script(script));
    }
    if cli.autopilot {
        return Ok(Driver::Autopilot(Autopilot::new(seed)));
    }
    Ok(Driver::Idle)
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_pursuit(value: &str) -> Result<PursuitMode, String> {
    PursuitMode::parse(value).ok_or_else(|| format!("unknown pursuit mode '{value}'"))
}

fn default_run_id(seed: u64, timestamp_ms: u64) -> String {
    format!("chase-{seed}-{timestamp_ms}")
}

fn outcome_key(reason: Option<GameOverReason>) -> String {
    match reason {
        Some(GameOverReason::Victory) => "won",
        Some(GameOverReason::Caught) => "lost",
        None => "unfinished",
    }
    .to_string()
}

fn fail(run_id: &str, event: &str, error: &dyn Error) -> ! {
    emit_log(
        "error",
        event,
        run_id,
        None,
        json!({
            "error": error_chain(error),
        }),
    );
    std::process::exit(2);
}

fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn print_json_line<T: Serialize>(run_id: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(error) => emit_log(
            "error",
            "serialize_failed",
            run_id,
            None,
            json!({ "error": error.to_string() }),
        ),
    }
}

fn emit_log(level: &str, event: &str, run_id: &str, tick: Option<u64>, details: Value) {
    let log_line = StructuredLogLine {
        timestamp_ms: now_ms(),
        level: level.to_string(),
        event: event.to_string(),
        run_id: run_id.to_string(),
        tick,
        details,
    };
    if let Ok(line) = serde_json::to_string(&log_line) {
        eprintln!("{line}");
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    std::fs::write(path, summary_text)
}
