//! Rich text rendering for request messages.
//!
//! Upstream services author messages in a small HTML-ish subset: `<b>`,
//! `<i>` (and their `strong`/`em` aliases), `<br>`, and the common named
//! entities. This module converts that subset into styled ratatui lines.
//! Unknown tags are dropped, their content kept.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Convert message markup into renderable lines.
///
/// An empty message produces no lines. Color is not applied here; callers
/// patch the theme's text color over the result.
#[must_use]
pub fn to_lines(markup: &str) -> Vec<Line<'static>> {
    if markup.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = markup.chars().collect();
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut bold = false;
    let mut italic = false;
    let mut i = 0usize;

    // Close out the text run accumulated under the current style.
    fn flush(spans: &mut Vec<Span<'static>>, current: &mut String, bold: bool, italic: bool) {
        if current.is_empty() {
            return;
        }
        let mut style = Style::default();
        if bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        spans.push(Span::styled(std::mem::take(current), style));
    }

    while i < chars.len() {
        match chars[i] {
            '<' => {
                let Some(end) = find_from(&chars, i.saturating_add(1), '>') else {
                    // Unterminated tag: keep the rest as literal text.
                    current.extend(&chars[i..]);
                    break;
                };
                let tag: String = chars[i.saturating_add(1)..end].iter().collect();
                let name = tag.trim().trim_end_matches('/').trim().to_ascii_lowercase();
                match name.as_str() {
                    "b" | "strong" => {
                        flush(&mut spans, &mut current, bold, italic);
                        bold = true;
                    },
                    "/b" | "/strong" => {
                        flush(&mut spans, &mut current, bold, italic);
                        bold = false;
                    },
                    "i" | "em" => {
                        flush(&mut spans, &mut current, bold, italic);
                        italic = true;
                    },
                    "/i" | "/em" => {
                        flush(&mut spans, &mut current, bold, italic);
                        italic = false;
                    },
                    "br" => {
                        flush(&mut spans, &mut current, bold, italic);
                        lines.push(Line::from(std::mem::take(&mut spans)));
                    },
                    _ => {},
                }
                i = end.saturating_add(1);
            },
            '\n' => {
                flush(&mut spans, &mut current, bold, italic);
                lines.push(Line::from(std::mem::take(&mut spans)));
                i = i.saturating_add(1);
            },
            '&' => {
                let (text, next) = decode_entity(&chars, i);
                current.push_str(&text);
                i = next;
            },
            c => {
                current.push(c);
                i = i.saturating_add(1);
            },
        }
    }

    flush(&mut spans, &mut current, bold, italic);
    if !spans.is_empty() || lines.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

/// Find `needle` in `chars` at or after `from`.
fn find_from(chars: &[char], from: usize, needle: char) -> Option<usize> {
    chars
        .iter()
        .enumerate()
        .skip(from)
        .find_map(|(idx, &c)| (c == needle).then_some(idx))
}

/// Decode an entity starting at the `&` in `chars[at]`.
///
/// Returns the decoded (or literal) text and the index to resume from.
fn decode_entity(chars: &[char], at: usize) -> (String, usize) {
    const MAX_ENTITY_LEN: usize = 8;

    let mut j = at.saturating_add(1);
    let mut name = String::new();
    while j < chars.len() && name.len() < MAX_ENTITY_LEN {
        let c = chars[j];
        if c == ';' {
            let decoded = match name.as_str() {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "#39" | "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => None,
            };
            return match decoded {
                Some(c) => (c.to_string(), j.saturating_add(1)),
                // Unknown entity: keep it verbatim.
                None => (format!("&{name};"), j.saturating_add(1)),
            };
        }
        if !c.is_ascii_alphanumeric() && c != '#' {
            break;
        }
        name.push(c);
        j = j.saturating_add(1);
    }

    // No terminator: a bare ampersand.
    ("&".to_string(), at.saturating_add(1))
}
