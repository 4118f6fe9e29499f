use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ToggleMinimizeAll,
    // Dock cursor
    DockPrev,
    DockNext,
    DockActivate,
    /// Toggle the window at this dock position (zero-based).
    ToggleWindow(u8),
    FocusNext,
    CloseTopmost,
    CancelGesture,
    // Scrolling the topmost window
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollHome,
    ScrollEnd,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Quit => write!(f, "quitter"),
            Action::ToggleMinimizeAll => write!(f, "tout réduire"),
            Action::DockPrev => write!(f, "dock précédent"),
            Action::DockNext => write!(f, "dock suivant"),
            Action::DockActivate => write!(f, "ouvrir"),
            Action::ToggleWindow(idx) => write!(f, "fenêtre {}", u16::from(*idx) + 1),
            Action::FocusNext => write!(f, "focus"),
            Action::CloseTopmost => write!(f, "fermer"),
            Action::CancelGesture => write!(f, "annuler"),
            Action::ScrollUp => write!(f, "défiler vers le haut"),
            Action::ScrollDown => write!(f, "défiler vers le bas"),
            Action::ScrollPageUp => write!(f, "page précédente"),
            Action::ScrollPageDown => write!(f, "page suivante"),
            Action::ScrollHome => write!(f, "début"),
            Action::ScrollEnd => write!(f, "fin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        // terminals disagree on whether shifted characters carry SHIFT
        let mods = match key.code {
            KeyCode::Char(_) => key.modifiers - KeyModifiers::SHIFT,
            _ => key.modifiers,
        };
        key.code == self.code && mods == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(' ') => "Espace".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Entrée".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Home => "Début".to_string(),
            KeyCode::End => "Fin".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Ordered key table. The first matching combo wins.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    entries: Vec<(KeyCombo, Action)>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        kb.add(Quit, KeyCombo::plain(KeyCode::Char('q')));
        kb.add(ToggleMinimizeAll, KeyCombo::plain(KeyCode::Char('m')));
        kb.add(DockPrev, KeyCombo::plain(KeyCode::Left));
        kb.add(DockNext, KeyCombo::plain(KeyCode::Right));
        kb.add(DockActivate, KeyCombo::plain(KeyCode::Enter));
        kb.add(DockActivate, KeyCombo::plain(KeyCode::Char(' ')));
        for (idx, digit) in ('1'..='9').enumerate() {
            kb.add(ToggleWindow(idx as u8), KeyCombo::plain(KeyCode::Char(digit)));
        }
        kb.add(FocusNext, KeyCombo::plain(KeyCode::Tab));
        kb.add(CloseTopmost, KeyCombo::plain(KeyCode::Char('x')));
        kb.add(CancelGesture, KeyCombo::plain(KeyCode::Esc));
        kb.add(ScrollUp, KeyCombo::plain(KeyCode::Up));
        kb.add(ScrollDown, KeyCombo::plain(KeyCode::Down));
        kb.add(ScrollPageUp, KeyCombo::plain(KeyCode::PageUp));
        kb.add(ScrollPageDown, KeyCombo::plain(KeyCode::PageDown));
        kb.add(ScrollHome, KeyCombo::plain(KeyCode::Home));
        kb.add(ScrollEnd, KeyCombo::plain(KeyCode::End));
        kb
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.entries.push((combo, action));
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.entries
            .iter()
            .any(|(combo, act)| *act == action && combo.matches(key))
    }

    /// Action bound to a key press. Key releases map to nothing.
    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        self.entries
            .iter()
            .find(|(combo, _)| combo.matches(key))
            .map(|(_, action)| *action)
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, act)| *act == action)
            .map(|(combo, _)| combo.display())
            .collect()
    }

    /// One-line summary shown under the dock controls.
    pub fn hint_line(&self) -> String {
        let shown = [
            Action::Quit,
            Action::ToggleMinimizeAll,
            Action::DockActivate,
            Action::FocusNext,
            Action::CloseTopmost,
        ];
        let mut parts: Vec<String> = shown
            .iter()
            .filter_map(|action| {
                let combos = self.combos_for(*action);
                let last = combos.last()?;
                Some(format!("{last} {action}"))
            })
            .collect();
        let dock = [Action::DockPrev, Action::DockNext]
            .iter()
            .filter_map(|action| self.combos_for(*action).into_iter().next())
            .collect::<Vec<_>>();
        if !dock.is_empty() {
            parts.insert(parts.len().min(2), format!("{} dock", dock.join("/")));
        }
        parts.join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quit() {
        let kb = KeyBindings::standard();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
        assert_eq!(kb.action_for_key(&ev), Some(Action::Quit));
    }

    #[test]
    fn digits_toggle_by_dock_position() {
        let kb = KeyBindings::standard();
        let ev = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&ev), Some(Action::ToggleWindow(2)));
    }

    #[test]
    fn shifted_chars_still_match() {
        let kb = KeyBindings::standard();
        let ev = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::SHIFT);
        assert_eq!(kb.action_for_key(&ev), Some(Action::ToggleMinimizeAll));
    }

    #[test]
    fn releases_are_ignored() {
        let kb = KeyBindings::standard();
        let mut ev = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;
        assert_eq!(kb.action_for_key(&ev), None);
    }

    #[test]
    fn hint_line_lists_main_actions() {
        let hint = KeyBindings::standard().hint_line();
        assert!(hint.starts_with("q quitter · m tout réduire · ←/→ dock"));
        assert!(hint.contains("x fermer"));
    }
}
