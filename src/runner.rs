use std::io;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::host::{Desktop, Outcome};

/// Drives `desktop` until it asks to quit.
///
/// Each tick redraws the full desktop and input is routed through
/// [`Desktop::handle_event`]. Backend errors surface as `io::Error`. The
/// live gesture is cancelled before returning, whether the loop ended
/// normally or with an error.
pub fn run_desktop<B, D, E>(
    terminal: &mut Terminal<B>,
    driver: D,
    desktop: &mut Desktop,
    poll_interval: Duration,
) -> Result<(), E>
where
    B: Backend,
    D: InputDriver,
    E: From<io::Error>,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    let result = event_loop.run(|_driver, event| {
        match event {
            Some(evt) => {
                if desktop.handle_event(&evt) == Outcome::Quit {
                    tracing::info!("quit requested");
                    return Ok(ControlFlow::Quit);
                }
            }
            None => {
                terminal
                    .draw(|frame| desktop.render(frame))
                    .map_err(|e| io::Error::other(e.to_string()))?;
            }
        }
        Ok(ControlFlow::Continue)
    });

    desktop.teardown();
    result.map_err(E::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{CellMetrics, Viewport};
    use crate::window::WindowId;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Event>);

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    #[test]
    fn runs_script_and_draws() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let viewport = Viewport::new(Rect::new(0, 0, 120, 40), CellMetrics::default());
        let mut desktop = Desktop::portfolio(viewport);
        let script = Scripted(VecDeque::from(vec![
            Event::Key(KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE)),
            Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
        ]));

        run_desktop::<_, _, io::Error>(&mut terminal, script, &mut desktop, Duration::ZERO)
            .unwrap();

        assert!(desktop.registry().get(WindowId(2)).unwrap().visible());
        assert!(!desktop.controller().is_active());
        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("A PROPOS DE MOI"));
    }
}
