use std::{fs::File, path::PathBuf};

use anyhow::Context as _;
use env_logger::{Env, Target};

/// Logging options shared by all subcommands.
///
/// The terminal belongs to the UI, so logs only go to a file and are
/// disabled unless `--log-file` is given. Filter with `RUST_LOG`.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LogArg {
    /// Write engine logs to this file
    #[clap(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl LogArg {
    pub(crate) fn init(&self) -> anyhow::Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let file = File::create(path)
            .with_context(|| format!("failed to create log file: {}", path.display()))?;
        env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .target(Target::Pipe(Box::new(file)))
            .try_init()?;
        log::info!("logging to {}", path.display());
        Ok(())
    }
}
