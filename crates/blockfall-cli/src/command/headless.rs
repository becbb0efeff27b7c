use std::time::Duration;

use blockfall_engine::{ActionError, GameSession, PieceSeed};

use crate::logging::LogArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HeadlessArg {
    /// Seed for the piece sequence (32 hex digits)
    #[clap(long, value_name = "HEX")]
    seed: PieceSeed,
    /// Time advanced by each `T` action, in milliseconds
    #[clap(long, value_name = "N", default_value_t = 16)]
    tick_ms: u64,
    #[clap(flatten)]
    log: LogArg,
    /// Actions to apply in order: L (left), R (right), U (rotate),
    /// D (soft drop), H (hard drop), C (hold), P (pause), T (tick).
    /// Whitespace is ignored.
    actions: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    Hold,
    TogglePause,
    Tick,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid action '{ch}' at position {position}")]
struct ParseActionError {
    ch: char,
    position: usize,
}

impl Action {
    fn from_char(ch: char) -> Option<Self> {
        let action = match ch.to_ascii_uppercase() {
            'L' => Self::MoveLeft,
            'R' => Self::MoveRight,
            'U' => Self::Rotate,
            'D' => Self::SoftDrop,
            'H' => Self::HardDrop,
            'C' => Self::Hold,
            'P' => Self::TogglePause,
            'T' => Self::Tick,
            _ => return None,
        };
        Some(action)
    }

    fn apply(self, session: &mut GameSession, tick: Duration) -> Result<(), ActionError> {
        match self {
            Self::MoveLeft => session.try_move_left(),
            Self::MoveRight => session.try_move_right(),
            Self::Rotate => session.try_rotate_cw(),
            Self::SoftDrop => session.soft_drop(),
            Self::HardDrop => session.hard_drop(),
            Self::Hold => session.try_hold(),
            Self::TogglePause => {
                session.toggle_pause();
                Ok(())
            }
            Self::Tick => {
                session.tick(tick);
                Ok(())
            }
        }
    }
}

fn parse_actions(script: &str) -> Result<Vec<Action>, ParseActionError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(position, ch)| Action::from_char(ch).ok_or(ParseActionError { ch, position }))
        .collect()
}

fn run_script(seed: PieceSeed, tick: Duration, actions: &[Action]) -> GameSession {
    let mut session = GameSession::with_seed(seed);
    for (i, action) in actions.iter().copied().enumerate() {
        if let Err(err) = action.apply(&mut session, tick) {
            log::debug!("action #{i} {action:?} ignored: {err}");
        }
    }
    session
}

pub(crate) fn run(arg: &HeadlessArg) -> anyhow::Result<()> {
    let HeadlessArg {
        seed,
        tick_ms,
        log: log_arg,
        actions,
    } = arg;
    log_arg.init()?;

    let actions = parse_actions(actions)?;
    let session = run_script(*seed, Duration::from_millis(*tick_ms), &actions);
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}
