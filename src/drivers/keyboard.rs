use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Smooths over platform differences in key reporting.
///
/// Releases never reach the desktop. Windows consoles report auto-repeat
/// as extra events; those are dropped there, and a held Esc counts once so
/// a long press cannot cancel a gesture started after it.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_held: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        let Event::Key(key) = evt else {
            return Some(evt);
        };
        self.normalize_key(key).map(Event::Key)
    }

    fn normalize_key(&mut self, mut key: KeyEvent) -> Option<KeyEvent> {
        let esc = key.code == KeyCode::Esc;
        match key.kind {
            KeyEventKind::Release => {
                if esc {
                    self.esc_held = false;
                }
                return None;
            }
            KeyEventKind::Repeat if cfg!(windows) => return None,
            KeyEventKind::Repeat | KeyEventKind::Press => {}
        }
        if esc && self.esc_held && cfg!(windows) {
            return None;
        }
        self.esc_held = esc;

        // focus cycling has a single direction
        if key.code == KeyCode::BackTab {
            key.code = KeyCode::Tab;
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn with_kind(code: KeyCode, kind: KeyEventKind) -> Event {
        let mut key = KeyEvent::new(code, KeyModifiers::NONE);
        key.kind = kind;
        Event::Key(key)
    }

    #[test]
    fn backtab_becomes_tab() {
        let mut norm = KeyboardNormalizer::new();
        let out = norm.normalize(press(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(out, Some(press(KeyCode::Tab, KeyModifiers::NONE)));
    }

    #[test]
    fn releases_are_dropped() {
        let mut norm = KeyboardNormalizer::new();
        assert!(norm
            .normalize(with_kind(KeyCode::Char('m'), KeyEventKind::Release))
            .is_none());
        assert_eq!(
            norm.normalize(with_kind(KeyCode::Down, KeyEventKind::Repeat))
                .is_some(),
            !cfg!(windows)
        );
        assert!(norm
            .normalize(press(KeyCode::Esc, KeyModifiers::NONE))
            .is_some());
    }

    #[test]
    fn non_key_events_pass_through() {
        let mut norm = KeyboardNormalizer::new();
        assert_eq!(
            norm.normalize(Event::Resize(10, 20)),
            Some(Event::Resize(10, 20))
        );
    }
}
