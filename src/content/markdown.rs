use pulldown_cmark::{Event as MdEvent, HeadingLevel, Options, Parser, Tag};
use ratatui::style::{Color, Modifier, Style};

use crate::theme;

use super::links::LinkFragment;

#[derive(Debug, Clone, Copy)]
enum TagKind {
    Strong,
    Emphasis,
    Heading,
    List,
    Item,
    CodeBlock,
    Paragraph,
    Link,
    Other,
}

/// Parses markdown into styled fragment lines.
///
/// Explicit `[label](target)` links keep their target on the fragment; bare
/// URLs are left for the linkifier.
pub fn parse(raw: &str) -> Vec<Vec<LinkFragment>> {
    let parser = Parser::new_ext(raw, Options::all());

    let mut lines: Vec<Vec<LinkFragment>> = Vec::new();
    let mut current: Vec<LinkFragment> = Vec::new();

    let mut list_start: Vec<Option<u64>> = Vec::new();
    let mut list_count: Vec<u64> = Vec::new();
    let mut tag_stack: Vec<TagKind> = Vec::new();
    let mut bold = false;
    let mut italic = false;
    let mut heading: Option<HeadingLevel> = None;
    let mut in_code_block = false;
    let mut link: Option<String> = None;

    let in_item = |stack: &[TagKind]| stack.iter().any(|k| matches!(k, TagKind::Item));

    for ev in parser {
        match ev {
            MdEvent::Start(tag) => match tag {
                Tag::Strong => {
                    tag_stack.push(TagKind::Strong);
                    bold = true;
                }
                Tag::Emphasis => {
                    tag_stack.push(TagKind::Emphasis);
                    italic = true;
                }
                Tag::List(start) => {
                    tag_stack.push(TagKind::List);
                    list_start.push(start);
                    list_count.push(0);
                }
                Tag::Item => {
                    tag_stack.push(TagKind::Item);
                    if let Some(last) = list_count.last_mut() {
                        *last = last.saturating_add(1);
                    }
                    let indent = "  ".repeat(list_count.len().saturating_sub(1));
                    let bullet = match list_start.last().copied().flatten() {
                        Some(start) => {
                            let idx = list_count.last().copied().unwrap_or(1);
                            format!("{indent}{}. ", start + idx - 1)
                        }
                        None => format!("{indent}• "),
                    };
                    current.push(LinkFragment::new(bullet, Style::default(), None));
                }
                Tag::CodeBlock(_) => {
                    tag_stack.push(TagKind::CodeBlock);
                    in_code_block = true;
                }
                Tag::Paragraph => tag_stack.push(TagKind::Paragraph),
                Tag::Heading { level, .. } => {
                    tag_stack.push(TagKind::Heading);
                    heading = Some(level);
                }
                Tag::Link { dest_url, .. } => {
                    tag_stack.push(TagKind::Link);
                    link = Some(dest_url.to_string());
                }
                _ => tag_stack.push(TagKind::Other),
            },
            MdEvent::End(_) => {
                let Some(kind) = tag_stack.pop() else {
                    continue;
                };
                match kind {
                    TagKind::Strong => bold = false,
                    TagKind::Emphasis => italic = false,
                    TagKind::Link => link = None,
                    TagKind::Item => {
                        if !current.is_empty() {
                            lines.push(std::mem::take(&mut current));
                        }
                    }
                    TagKind::List => {
                        list_start.pop();
                        list_count.pop();
                        if !in_item(&tag_stack) {
                            lines.push(Vec::new());
                        }
                    }
                    TagKind::CodeBlock => {
                        in_code_block = false;
                        lines.push(Vec::new());
                    }
                    TagKind::Paragraph => {
                        lines.push(std::mem::take(&mut current));
                        if !in_item(&tag_stack) {
                            lines.push(Vec::new());
                        }
                    }
                    TagKind::Heading => {
                        heading = None;
                        lines.push(std::mem::take(&mut current));
                        lines.push(Vec::new());
                    }
                    TagKind::Other => {}
                }
            }
            MdEvent::Text(text) => {
                let style = if in_code_block {
                    Style::default().fg(Color::Yellow)
                } else {
                    text_style(bold, italic, heading)
                };
                if in_code_block {
                    // code blocks keep their own line structure
                    let mut parts = text.split('\n').peekable();
                    while let Some(part) = parts.next() {
                        if !part.is_empty() {
                            current.push(LinkFragment::new(part, style, None));
                        }
                        if parts.peek().is_some() {
                            lines.push(std::mem::take(&mut current));
                        }
                    }
                } else {
                    current.push(LinkFragment::new(text.to_string(), style, link.clone()));
                }
            }
            MdEvent::Code(text) => {
                current.push(LinkFragment::new(
                    text.to_string(),
                    Style::default().fg(Color::Yellow),
                    link.clone(),
                ));
            }
            MdEvent::SoftBreak => {
                current.push(LinkFragment::new(" ", Style::default(), None));
            }
            MdEvent::HardBreak => {
                lines.push(std::mem::take(&mut current));
                if in_item(&tag_stack) {
                    let indent = "  ".repeat(list_count.len());
                    current.push(LinkFragment::new(indent, Style::default(), None));
                }
            }
            MdEvent::Rule => {
                lines.push(vec![LinkFragment::new("─".repeat(8), Style::default(), None)]);
            }
            _ => {}
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn text_style(bold: bool, italic: bool, heading: Option<HeadingLevel>) -> Style {
    let mut style = Style::default();
    match heading {
        Some(HeadingLevel::H1) => {
            style = style
                .fg(theme::accent())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        Some(_) => style = style.add_modifier(Modifier::BOLD),
        None => {}
    }
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    style
}
