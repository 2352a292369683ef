use std::{io, path::PathBuf};

use anyhow::Context as _;

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Engine configuration file (JSON); defaults are printed when omitted
    #[clap(long)]
    config: Option<PathBuf>,
}

pub(crate) fn run(arg: &ConfigArg) -> anyhow::Result<()> {
    let config = util::load_engine_config(arg.config.as_deref())?;
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &config)
        .context("Failed to write configuration to stdout")?;
    io::Write::write_all(&mut stdout, b"\n").context("Failed to write to stdout")?;
    Ok(())
}
