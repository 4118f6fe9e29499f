use std::io;

use clap::Parser;
use crossterm::terminal;
use ratatui::layout::Rect;

use folio_wm::config::{Cli, Config};
use folio_wm::drivers::{ConsoleInputDriver, ConsoleSession};
use folio_wm::host::Desktop;
use folio_wm::runner::run_desktop;
use folio_wm::tracing_sub;
use folio_wm::viewport::Viewport;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config =
        Config::try_from(&cli).map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    tracing_sub::init(config.log_level, config.log_file.as_deref())?;

    let viewport = if config.metrics_overridden {
        let (columns, rows) = terminal::size()?;
        Viewport::new(Rect::new(0, 0, columns, rows), config.cell_metrics)
    } else {
        Viewport::from_terminal(config.cell_metrics)?
    };
    let screen = viewport.screen();
    tracing::info!(
        width = screen.width,
        height = screen.height,
        fps = config.fps,
        "starting desktop"
    );

    let mut desktop = Desktop::portfolio(viewport);
    if config.start_minimized {
        desktop = desktop.start_minimized();
    }

    let mut session = ConsoleSession::start()?;
    let result = run_desktop::<_, _, io::Error>(
        session.terminal_mut(),
        ConsoleInputDriver::new(),
        &mut desktop,
        config.poll_interval(),
    );
    session.exit()?;
    if let Err(err) = &result {
        tracing::error!(error = %err, "desktop stopped");
    }
    result
}
