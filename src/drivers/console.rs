use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::InputDriver;
use super::keyboard::KeyboardNormalizer;

/// Reads input from the controlling terminal.
///
/// Consecutive left-button drag reports are coalesced so a fast drag
/// costs one pointer update per burst instead of one per cell crossed.
pub struct ConsoleInputDriver {
    normalizer: KeyboardNormalizer,
    pending: VecDeque<Event>,
}

impl Default for ConsoleInputDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self {
            normalizer: KeyboardNormalizer::new(),
            pending: VecDeque::new(),
        }
    }

    fn next_normalized(&mut self) -> io::Result<Event> {
        loop {
            if let Some(evt) = self.normalizer.normalize(crossterm::event::read()?) {
                return Ok(evt);
            }
        }
    }

    /// Folds the drags that follow `first` into the last one. The first
    /// non-drag event is parked in `pending`.
    fn coalesce<F>(&mut self, first: Event, mut next: F) -> io::Result<Event>
    where
        F: FnMut(&mut Self) -> io::Result<Option<Event>>,
    {
        if !is_left_drag(&first) {
            return Ok(first);
        }
        let mut latest = first;
        while let Some(evt) = next(self)? {
            if is_left_drag(&evt) {
                latest = evt;
            } else {
                self.pending.push_back(evt);
                break;
            }
        }
        Ok(latest)
    }
}

fn is_left_drag(evt: &Event) -> bool {
    matches!(
        evt,
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            ..
        })
    )
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        if !self.pending.is_empty() {
            return Ok(true);
        }
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        if let Some(evt) = self.pending.pop_front() {
            return Ok(evt);
        }
        let first = self.next_normalized()?;
        self.coalesce(first, |driver| {
            if crossterm::event::poll(Duration::ZERO)? {
                driver.next_normalized().map(Some)
            } else {
                Ok(None)
            }
        })
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        }
    }
}

/// Terminal modes held for the lifetime of the desktop.
///
/// Entering switches to the alternate screen, raw mode and mouse capture.
/// Dropping the session restores the terminal, so every exit path,
/// including `?` propagation out of the event loop, leaves the shell usable.
pub struct ConsoleSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleSession {
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            entered: false,
        })
    }

    /// Creates the session and enters it in one step.
    pub fn start() -> io::Result<Self> {
        let mut session = Self::new()?;
        session.enter()?;
        Ok(session)
    }

    pub fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }
        execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            EnableMouseCapture
        )?;
        terminal::enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.entered = true;
        tracing::debug!("console session entered");
        Ok(())
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        tracing::debug!("console session restored");
        Ok(())
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for ConsoleSession {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}
