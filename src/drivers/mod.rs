pub mod console;
pub mod keyboard;

use crossterm::event::Event;
use std::io;
use std::time::Duration;

pub use console::{ConsoleInputDriver, ConsoleSession};

/// Source of terminal input for the event loop.
///
/// Mouse capture defaults to a no-op for drivers that replay recorded input.
pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    #[derive(Default)]
    struct Recorder {
        capture: Vec<bool>,
    }

    impl InputDriver for Recorder {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(true)
        }

        fn read(&mut self) -> io::Result<Event> {
            Ok(Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 4,
                row: 2,
                modifiers: KeyModifiers::NONE,
            }))
        }

        fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
            self.capture.push(enabled);
            Ok(())
        }
    }

    fn borrow_and_capture<D: InputDriver>(mut driver: D) -> io::Result<Event> {
        driver.set_mouse_capture(true)?;
        driver.read()
    }

    #[test]
    fn borrowed_driver_forwards_calls() {
        let mut recorder = Recorder::default();
        let evt = borrow_and_capture(&mut recorder).unwrap();
        assert!(matches!(evt, Event::Mouse(m) if (m.column, m.row) == (4, 2)));
        assert_eq!(recorder.capture, vec![true]);
    }
}
