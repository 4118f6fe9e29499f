use ratatui::style::{Color, Modifier, Style};

// Centralized colors. Windows, the dock and the restore hint pull their
// styles from here so the palette can change in one place.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);

pub fn accent() -> Color {
    Color::Rgb(ACCENT_RGB.0, ACCENT_RGB.1, ACCENT_RGB.2)
}

// Desktop
pub fn desktop_bg() -> Color {
    Color::Black
}

// Decorator
pub fn decorator_header_bg() -> Color {
    Color::Blue
}
pub fn decorator_header_fg() -> Color {
    Color::White
}
pub fn decorator_inactive_header_bg() -> Color {
    Color::DarkGray
}
pub fn decorator_border() -> Color {
    Color::DarkGray
}
pub fn window_body_bg() -> Color {
    Color::Reset
}

pub fn header_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(decorator_header_bg())
            .fg(decorator_header_fg())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(decorator_inactive_header_bg())
            .fg(decorator_header_fg())
    }
}

// Dock
pub fn dock_bg() -> Color {
    Color::DarkGray
}
pub fn dock_fg() -> Color {
    Color::White
}
pub fn dock_pressed_bg() -> Color {
    Color::Gray
}
pub fn dock_pressed_fg() -> Color {
    Color::Black
}
pub fn dock_hint_fg() -> Color {
    Color::Gray
}

pub fn dock_style(pressed: bool, cursor: bool) -> Style {
    let base = if pressed {
        Style::default().bg(dock_pressed_bg()).fg(dock_pressed_fg())
    } else {
        Style::default().bg(dock_bg()).fg(dock_fg())
    };
    if cursor {
        base.add_modifier(Modifier::REVERSED)
    } else {
        base
    }
}

// Restore hint
pub fn hint_border() -> Color {
    accent()
}

// Links inside window content
pub fn link_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED)
}
