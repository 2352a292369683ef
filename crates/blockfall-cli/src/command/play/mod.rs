use std::{io, path::PathBuf};

use anyhow::Context as _;
use blockfall_engine::{GameSession, RandomPieces};
use ratatui_runtime::Runtime;

use self::{app::PlayApp, screen::PlayScreen};
use crate::util;

mod app;
mod screen;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence; random when omitted
    #[clap(long)]
    pub(crate) seed: Option<u64>,
    /// Engine configuration file (JSON)
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Do not award points for soft and hard drops
    #[clap(long)]
    pub(crate) no_drop_bonus: bool,
    /// Write logs to this file (filter with `RUST_LOG`)
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
    /// Print the final score, lines and level as JSON after exiting
    #[clap(long)]
    pub(crate) print_stats: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        config,
        no_drop_bonus,
        log_file,
        print_stats,
    } = arg;

    util::init_logging(log_file.as_deref())?;

    let mut config = util::load_engine_config(config.as_deref())?;
    if *no_drop_bonus {
        config.drop_bonus = false;
    }
    let pieces = match seed {
        Some(seed) => RandomPieces::seeded(*seed),
        None => RandomPieces::from_entropy()?,
    };
    tracing::info!(?seed, drop_bonus = config.drop_bonus, "starting play");
    let session = GameSession::new(config, pieces)?;

    let mut app = PlayApp::new(PlayScreen::new(session));
    Runtime::new()
        .run(&mut app)
        .context("Terminal I/O failed")?;

    if *print_stats {
        let readout = app.into_screen().session().readout();
        let mut stdout = io::stdout().lock();
        serde_json::to_writer(&mut stdout, &readout).context("Failed to write stats")?;
        io::Write::write_all(&mut stdout, b"\n").context("Failed to write stats")?;
    }

    Ok(())
}
