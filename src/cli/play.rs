//! Play command implementation.

use super::{seed_or_clock, CliError, ConfigArgs};
use gridcrawl::session::{FrameStyle, LineSource, Session, SessionEnd, TextRenderer};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, IsTerminal};

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the config is invalid or terminal IO fails.
pub(crate) fn execute(config: &ConfigArgs, seed: Option<u64>, raw: bool) -> Result<(), CliError> {
    let config = config.resolve()?;
    let seed = seed_or_clock(seed);
    info!("playing with seed {seed}");

    let mut session = Session::new(&config, StdRng::seed_from_u64(seed))?;

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut source = if interactive {
        LineSource::new(stdin.lock(), io::stdout())
    } else {
        LineSource::quiet(stdin.lock(), io::stdout())
    };

    let style = if raw {
        FrameStyle::Markers
    } else {
        FrameStyle::Ascii
    };
    let mut renderer = TextRenderer::new(io::stdout(), style);

    if interactive {
        println!("Seed {seed}. Move with north/south/east/west (or a prefix), wait, quit.");
    }

    let summary = session.run(&mut source, &mut renderer)?;

    let how = match summary.end {
        SessionEnd::Cleared => "cleared the grid",
        SessionEnd::PlayerDefeated => "defeated",
        SessionEnd::Quit => "quit",
        SessionEnd::EndOfInput => "out of input",
        SessionEnd::TurnLimit => "turn limit reached",
    };
    println!(
        "Finished ({how}) after {} turns: {} enemies defeated, {} HP left.",
        summary.turns, summary.enemies_defeated, summary.player_health
    );

    Ok(())
}
