// snake_cli/src/main.rs
#![forbid(unsafe_code)]

mod rollout;
mod terminal;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::rollout::{NoopSink, RolloutSink, Runner, RunnerConfig, TableSink};
use snake_engine::{Game, GameConfig, HttpReporter, InputKind, LocalLedger, ScoreReporter};

#[derive(Parser, Debug)]
#[command(name = "snake_cli")]
struct Args {
    // ---------------- game setup ----------------
    /// TOML config file (grid, items, report). Defaults apply when omitted.
    #[arg(long, value_name = "toml")]
    config: Option<PathBuf>,

    /// Grid width override.
    #[arg(long)]
    width: Option<usize>,

    /// Grid height override.
    #[arg(long)]
    height: Option<usize>,

    /// Score-saving endpoint override. Without one, coins are computed locally.
    #[arg(long)]
    endpoint: Option<String>,

    /// Print the effective config as TOML and exit.
    #[arg(long)]
    dump_config: bool,

    /// Base RNG seed (batch sessions use base_seed + session_id). If omitted, a fixed default is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Input: keyboard | autopilot | random
    #[arg(long, default_value = "autopilot")]
    input: String,

    // ---------------- batch sizing ----------------
    /// Sessions to play in batch mode (autopilot / random).
    #[arg(long, default_value_t = 100)]
    sessions: u64,

    /// End a batch session after this many ticks (0 = uncapped).
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    // ---------------- visualization ----------------
    /**
     * Render the board as ASCII every frame in batch mode; value is sleep in ms.
     * Examples:
     *   --render 0    (render as fast as possible)
     *   --render 80   (watch the autopilot play)
     */
    #[arg(long, value_name = "ms")]
    render: Option<u64>,

    // ---------------- output / reporting ----------------
    /// Verbosity: 0=silent (final summary only), 1=progress bar, 2=progress bar + periodic table.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,

    /// Print a table row every N sessions (only used with --verbosity 2).
    #[arg(long, default_value_t = 10)]
    report_every: u64,
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut cfg = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => GameConfig::default(),
    };

    if args.width.is_some() || args.height.is_some() {
        let w = args.width.unwrap_or(cfg.grid.width);
        let h = args.height.unwrap_or(cfg.grid.height);
        cfg = cfg.with_grid(w, h);
    }
    if let Some(url) = &args.endpoint {
        cfg.report.endpoint = Some(url.clone());
    }

    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}

fn build_reporter(cfg: &GameConfig) -> Result<Box<dyn ScoreReporter>> {
    let http = HttpReporter::from_config(&cfg.report).context("cannot build HTTP reporter")?;
    Ok(match http {
        Some(r) => {
            info!("reporting scores to {}", r.endpoint());
            Box::new(r)
        }
        None => {
            info!("no endpoint configured, using the local coin ledger");
            Box::new(LocalLedger::new())
        }
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let cfg = load_config(&args)?;

    if args.dump_config {
        print!("{}", cfg.to_toml_string().context("cannot serialize config")?);
        return Ok(());
    }

    let base_seed = args.seed.unwrap_or(12345);
    let input = InputKind::from_cli(&args.input);
    let reporter = build_reporter(&cfg)?;

    if input == InputKind::Keyboard {
        let game = Game::with_config(cfg, base_seed)?;
        let out = terminal::play(game, reporter)?;
        match out.last {
            Some(r) => println!(
                "DONE: sessions={} last_score={} last_items={} last_len={} last_end={:?} coins={}",
                out.sessions,
                r.score,
                r.items_collected,
                r.length,
                r.reason,
                out.reward.map_or(0, |o| o.coins),
            ),
            None => println!("DONE: sessions={}", out.sessions),
        }
        return Ok(());
    }

    let run_cfg = RunnerConfig {
        sessions: args.sessions,
        base_seed,
        input,
        game: cfg,
        max_ticks: args.max_ticks,
        verbosity: args.verbosity,
        report_every: args.report_every,
        render_ms: args.render,
    };

    // Reporting sink:
    // - verbosity 2 => periodic table (unless report_every == 0)
    // - otherwise   => no-op
    let sink: Box<dyn RolloutSink> = if run_cfg.verbosity >= 2 && run_cfg.report_every > 0 {
        Box::new(TableSink::new(20))
    } else {
        Box::new(NoopSink)
    };

    let mut runner = Runner::new(run_cfg, sink);
    let report = runner.run(reporter)?;

    // Final one-line summary (useful for logs / grep).
    println!(
        "DONE: input={:?} seed={} sessions={} ticks={} elapsed={:.3}s ticks/s={:.1} avg_score={:.2} best_score={} avg_items={:.2} avg_len={:.2} best_len={} avg_ticks={:.1} coins={} accepted={} (wall={} self={} full={} stopped={})",
        report.input,
        report.base_seed,
        report.sessions,
        report.ticks,
        report.elapsed_s,
        report.ticks_per_s,
        report.avg_score,
        report.best_score,
        report.avg_items,
        report.avg_len,
        report.best_len,
        report.avg_ticks,
        report.coins,
        report.rewards_accepted,
        report.hit_wall,
        report.hit_self,
        report.board_full,
        report.stopped,
    );
    Ok(())
}
