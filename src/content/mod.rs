//! Content slots: what each window shows in its body.
//!
//! Providers take no input and return a [`SectionBody`]. A window whose id
//! has no provider shows a placeholder instead.

pub mod links;
pub mod markdown;

use std::collections::BTreeMap;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::window::WindowId;

pub use links::{LinkOpener, Linkifier, browser_opener};

pub const PLACEHOLDER: &str = "content not found";

const ABOUT_MD: &str = include_str!("../../assets/sections/about.md");
const PARCOURS_MD: &str = include_str!("../../assets/sections/parcours.md");
const COMPETENCES_MD: &str = include_str!("../../assets/sections/competences.md");
const PROJETS_MD: &str = include_str!("../../assets/sections/projets.md");
const CONTACT_MD: &str = include_str!("../../assets/sections/contact.md");

/// Styled run of text, optionally pointing at a link target.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
    pub link: Option<String>,
}

impl Segment {
    pub fn plain(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            link: None,
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// Rendered body of one window: logical lines before wrapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionBody {
    lines: Vec<Vec<Segment>>,
}

impl SectionBody {
    pub fn new(lines: Vec<Vec<Segment>>) -> Self {
        Self { lines }
    }

    pub fn from_markdown(raw: &str) -> Self {
        let fragments = markdown::parse(raw);
        Self::new(Linkifier::new().linkify_fragments(fragments))
    }

    pub fn placeholder() -> Self {
        Self::new(vec![vec![Segment::plain(
            PLACEHOLDER,
            Style::default().add_modifier(Modifier::ITALIC),
        )]])
    }

    pub fn lines(&self) -> &[Vec<Segment>] {
        &self.lines
    }

    /// Word-wraps every line to `width` columns.
    ///
    /// Words longer than a row are split. Segments keep their style and link
    /// target across the split, so a wrapped link stays clickable on every
    /// row it covers.
    pub fn wrap(&self, width: u16) -> WrappedBody {
        let width = usize::from(width.max(1));
        let mut rows = Vec::new();
        for line in &self.lines {
            let mut row: Vec<Segment> = Vec::new();
            let mut used = 0;
            let mut continued = false;
            for segment in line {
                for word in split_words(&segment.text) {
                    let visible = word.trim_end().chars().count();
                    if used > 0 && used + visible > width {
                        rows.push(std::mem::take(&mut row));
                        used = 0;
                        continued = true;
                    }
                    let mut rest = word;
                    while rest.trim_end().chars().count() > width.saturating_sub(used) {
                        let room = width.saturating_sub(used);
                        let split = rest
                            .char_indices()
                            .nth(room)
                            .map_or(rest.len(), |(idx, _)| idx);
                        push_piece(&mut row, &rest[..split], segment);
                        rows.push(std::mem::take(&mut row));
                        used = 0;
                        continued = true;
                        rest = &rest[split..];
                    }
                    if continued && row.is_empty() && rest.trim().is_empty() {
                        continue;
                    }
                    used += rest.chars().count();
                    push_piece(&mut row, rest, segment);
                }
            }
            rows.push(row);
        }
        WrappedBody { rows }
    }
}

fn push_piece(row: &mut Vec<Segment>, text: &str, like: &Segment) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = row.last_mut()
        && last.style == like.style
        && last.link == like.link
    {
        last.text.push_str(text);
        return;
    }
    row.push(Segment {
        text: text.to_string(),
        style: like.style,
        link: like.link.clone(),
    });
}

/// Splits text into words that each keep their trailing whitespace.
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut in_space = false;
    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            in_space = true;
        } else if in_space {
            words.push(&text[start..idx]);
            start = idx;
            in_space = false;
        }
    }
    if start < text.len() {
        words.push(&text[start..]);
    }
    words
}

/// A [`SectionBody`] laid out for a given width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WrappedBody {
    rows: Vec<Vec<Segment>>,
}

impl WrappedBody {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Segment>] {
        &self.rows
    }

    /// Text for `height` rows starting at `offset`.
    pub fn visible_text(&self, offset: usize, height: usize) -> Text<'static> {
        let lines: Vec<Line<'static>> = self
            .rows
            .iter()
            .skip(offset)
            .take(height)
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|segment| Span::styled(segment.text.clone(), segment.style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        Text::from(lines)
    }

    /// Link target under column `col` of row `row`, if any.
    pub fn link_at(&self, row: usize, col: usize) -> Option<&str> {
        let mut start = 0;
        for segment in self.rows.get(row)? {
            let end = start + segment.width();
            if col >= start && col < end {
                return segment.link.as_deref();
            }
            start = end;
        }
        None
    }
}

type Provider = Box<dyn Fn() -> SectionBody>;

/// Per-window content providers.
#[derive(Default)]
pub struct ContentSlots {
    providers: BTreeMap<WindowId, Provider>,
}

impl std::fmt::Debug for ContentSlots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentSlots")
            .field("ids", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ContentSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, id: WindowId, provider: F) -> Self
    where
        F: Fn() -> SectionBody + 'static,
    {
        self.providers.insert(id, Box::new(provider));
        self
    }

    pub fn with_markdown(self, id: WindowId, raw: &'static str) -> Self {
        self.with(id, move || SectionBody::from_markdown(raw))
    }

    /// The five portfolio sections, keyed like the portfolio manifest.
    pub fn portfolio() -> Self {
        Self::new()
            .with_markdown(WindowId(1), ABOUT_MD)
            .with_markdown(WindowId(2), PARCOURS_MD)
            .with_markdown(WindowId(3), COMPETENCES_MD)
            .with_markdown(WindowId(4), PROJETS_MD)
            .with_markdown(WindowId(5), CONTACT_MD)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.providers.contains_key(&id)
    }

    pub fn body(&self, id: WindowId) -> SectionBody {
        match self.providers.get(&id) {
            Some(provider) => provider(),
            None => {
                tracing::debug!(window_id = ?id, "no content provider");
                SectionBody::placeholder()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(body: &WrappedBody, row: usize) -> String {
        body.rows()[row].iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn missing_provider_yields_placeholder() {
        let slots = ContentSlots::new();
        let body = slots.body(WindowId(9));
        assert_eq!(body, SectionBody::placeholder());
        assert_eq!(body.lines()[0][0].text, PLACEHOLDER);
    }

    #[test]
    fn portfolio_covers_every_manifest_window() {
        let slots = ContentSlots::portfolio();
        for id in crate::window::Manifest::portfolio().ids() {
            assert!(slots.contains(id));
            assert_ne!(slots.body(id), SectionBody::placeholder());
        }
    }

    #[test]
    fn wrap_breaks_on_words() {
        let body = SectionBody::new(vec![vec![Segment::plain(
            "alpha beta gamma",
            Style::default(),
        )]]);
        let wrapped = body.wrap(11);
        assert_eq!(wrapped.len(), 2);
        assert_eq!(row_text(&wrapped, 0), "alpha beta ");
        assert_eq!(row_text(&wrapped, 1), "gamma");
    }

    #[test]
    fn wrap_splits_long_words() {
        let body = SectionBody::new(vec![vec![Segment::plain("abcdefgh", Style::default())]]);
        let wrapped = body.wrap(3);
        assert_eq!(wrapped.len(), 3);
        assert_eq!(row_text(&wrapped, 2), "gh");
    }

    #[test]
    fn empty_lines_survive_wrapping() {
        let body = SectionBody::new(vec![
            vec![Segment::plain("a", Style::default())],
            Vec::new(),
            vec![Segment::plain("b", Style::default())],
        ]);
        assert_eq!(body.wrap(10).len(), 3);
    }

    #[test]
    fn link_lookup_by_column() {
        let body = SectionBody::from_markdown("see https://x.io now\n");
        let wrapped = body.wrap(40);
        assert_eq!(wrapped.link_at(0, 0), None);
        assert_eq!(wrapped.link_at(0, 4), Some("https://x.io"));
        assert_eq!(wrapped.link_at(0, 15), Some("https://x.io"));
        assert_eq!(wrapped.link_at(0, 16), None);
        assert_eq!(wrapped.link_at(5, 0), None);
    }
}
