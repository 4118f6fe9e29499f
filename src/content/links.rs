//! Link detection and opening for window content.
//!
//! Explicit markdown links arrive as fragments that already carry a target.
//! Everything else is scanned with `linkify` for URLs with a scheme and for
//! e-mail addresses, which open as `mailto:` targets.

use std::ops::Range;
use std::sync::Arc;

use linkify::{LinkFinder, LinkKind};
use ratatui::style::Style;

use crate::theme;

use super::Segment;

/// A callback that consumes a URL and returns `true` if it opened it.
pub type LinkOpener = Arc<dyn Fn(&str) -> bool + Send + Sync + 'static>;

/// Opens links in the system browser.
pub fn browser_opener() -> LinkOpener {
    Arc::new(|url: &str| match webbrowser::open(url) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(url, error = %err, "failed to open link");
            false
        }
    })
}

/// A piece of text with rendering `style` and optional explicit `link`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkFragment {
    pub text: String,
    pub style: Style,
    pub link: Option<String>,
}

impl LinkFragment {
    pub fn new(text: impl Into<String>, style: Style, link: Option<String>) -> Self {
        Self {
            text: text.into(),
            style,
            link,
        }
    }
}

/// A link found inside a single string. `range` is in bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectedLink {
    pub range: Range<usize>,
    pub url: String,
}

#[derive(Debug)]
pub struct Linkifier {
    finder: LinkFinder,
}

impl Default for Linkifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Linkifier {
    pub fn new() -> Self {
        let mut finder = LinkFinder::new();
        finder.kinds(&[LinkKind::Url, LinkKind::Email]);
        finder.url_must_have_scheme(true);
        Self { finder }
    }

    pub fn detect_links(&self, text: &str) -> Vec<DetectedLink> {
        let mut links = Vec::new();
        for span in self.finder.links(text) {
            let start = span.start();
            let (trimmed, _) = strip_trailing_punctuation(span.as_str());
            if trimmed.is_empty() {
                continue;
            }
            let url = match span.kind() {
                LinkKind::Email => format!("mailto:{trimmed}"),
                _ => trimmed.to_string(),
            };
            links.push(DetectedLink {
                range: start..start + trimmed.len(),
                url,
            });
        }
        links
    }

    /// Turns fragment lines into segments, splitting out detected links.
    pub fn linkify_fragments(&self, lines: Vec<Vec<LinkFragment>>) -> Vec<Vec<Segment>> {
        lines
            .into_iter()
            .map(|fragments| {
                let mut segments = Vec::new();
                for fragment in fragments {
                    self.process_fragment(fragment, &mut segments);
                }
                segments
            })
            .collect()
    }

    fn process_fragment(&self, fragment: LinkFragment, segments: &mut Vec<Segment>) {
        if let Some(link) = fragment.link {
            segments.push(Segment {
                text: fragment.text,
                style: decorate_link_style(fragment.style),
                link: Some(link),
            });
            return;
        }

        let text = fragment.text.as_str();
        let mut last = 0;
        for link in self.detect_links(text) {
            if link.range.start > last {
                segments.push(Segment::plain(&text[last..link.range.start], fragment.style));
            }
            segments.push(Segment {
                text: text[link.range.clone()].to_string(),
                style: decorate_link_style(fragment.style),
                link: Some(link.url),
            });
            last = link.range.end;
        }
        if last < text.len() {
            segments.push(Segment::plain(&text[last..], fragment.style));
        }
    }
}

pub fn decorate_link_style(style: Style) -> Style {
    style.patch(theme::link_style())
}

fn strip_trailing_punctuation(s: &str) -> (&str, &str) {
    let trimmed = s.trim_end_matches(['.', ',', '?', '!', ':', ';', ')', ']', '\'', '"']);
    (trimmed, &s[trimmed.len()..])
}
