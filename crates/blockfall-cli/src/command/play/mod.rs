use blockfall_engine::{GameSession, PieceSeed};

use crate::{command::play::app::PlayApp, logging::LogArg, tui::Tui};

mod app;
mod screen;

const DEFAULT_FPS: f64 = 60.0;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (32 hex digits); random if omitted
    #[clap(long, value_name = "HEX")]
    seed: Option<PieceSeed>,
    /// Update and redraw rate (frames per second)
    #[clap(long, default_value_t = DEFAULT_FPS)]
    fps: f64,
    /// Hide the landing preview of the falling piece
    #[clap(long)]
    no_ghost: bool,
    #[clap(flatten)]
    log: LogArg,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            fps: DEFAULT_FPS,
            no_ghost: false,
            log: LogArg::default(),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        fps,
        no_ghost,
        log: log_arg,
    } = arg;
    anyhow::ensure!(
        fps.is_finite() && *fps > 0.0,
        "--fps must be a positive number, got {fps}"
    );
    log_arg.init()?;

    let session = match seed {
        Some(seed) => GameSession::with_seed(*seed),
        None => GameSession::new(),
    };
    log::info!(
        "starting session (seed: {})",
        seed.map_or_else(|| "random".to_owned(), |seed| seed.to_string())
    );

    let mut app = PlayApp::new(session, *fps, !*no_ghost);
    Tui::new().run(&mut app)?;

    let stats = app.session().stats();
    log::info!(
        "exited with score {} after {} pieces",
        stats.score(),
        stats.completed_pieces()
    );
    Ok(())
}
