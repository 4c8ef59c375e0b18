//! Markdown Rendering
//!
//! Task titles and help text go through pulldown-cmark with one extension:
//! color spans written as `%r%red text%r%`. Raw HTML in the source is
//! escaped rather than passed through.

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser};

/// Color codes and their hex values
const COLORS: &[(&str, &str)] = &[
    ("r", "#e74c3c"), // red
    ("g", "#27ae60"), // green
    ("b", "#3498db"), // blue
    ("y", "#f1c40f"), // yellow
    ("o", "#e67e22"), // orange
    ("p", "#9b59b6"), // purple
];

/// Render a markdown document
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Render for inline use (strips the outer <p> tags)
pub fn parse_markdown_inline(text: &str) -> String {
    let html = parse_markdown(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

/// Adjacent text runs are merged before color spans are matched, since the
/// parser splits text at characters such as `[` and `_`.
fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut text = String::new();
    for event in parser {
        match event {
            Event::Text(raw) | Event::Html(raw) | Event::InlineHtml(raw) => text.push_str(&raw),
            other => {
                flush_text(&mut text, &mut events);
                events.push(other);
            }
        }
    }
    flush_text(&mut text, &mut events);
    events
}

fn flush_text(text: &mut String, events: &mut Vec<Event<'_>>) {
    if text.is_empty() {
        return;
    }
    let run = std::mem::take(text);
    if contains_color(&run) {
        events.extend(color_events(&run));
    } else {
        events.push(Event::Text(CowStr::from(run)));
    }
}

fn contains_color(text: &str) -> bool {
    COLORS.iter().any(|(code, _)| text.contains(&format!("%{}%", code)))
}

/// Split text on the earliest color marker, wrapping matched pairs in spans.
/// An unmatched marker is kept as plain text.
fn color_events(text: &str) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        let earliest = COLORS
            .iter()
            .filter_map(|(code, hex)| {
                let pattern = format!("%{}%", code);
                remaining.find(&pattern).map(|pos| (pos, pattern, *hex))
            })
            .min_by_key(|(pos, _, _)| *pos);

        let Some((pos, pattern, hex)) = earliest else {
            events.push(Event::Text(CowStr::from(remaining.to_string())));
            break;
        };

        if pos > 0 {
            events.push(Event::Text(CowStr::from(remaining[..pos].to_string())));
        }
        remaining = &remaining[pos + pattern.len()..];

        match remaining.find(&pattern) {
            Some(end) => {
                events.push(Event::Html(CowStr::from(format!("<span style=\"color: {}\">", hex))));
                if end > 0 {
                    events.push(Event::Text(CowStr::from(remaining[..end].to_string())));
                }
                events.push(Event::Html(CowStr::from("</span>")));
                remaining = &remaining[end + pattern.len()..];
            }
            None => events.push(Event::Text(CowStr::from(pattern))),
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_strips_paragraph() {
        assert_eq!(parse_markdown_inline("**bold** move"), "<strong>bold</strong> move");
    }

    #[test]
    fn test_color_span() {
        assert_eq!(
            parse_markdown_inline("fix %r%prod%r% now"),
            "fix <span style=\"color: #e74c3c\">prod</span> now"
        );
    }

    #[test]
    fn test_color_span_across_split_text() {
        assert_eq!(
            parse_markdown_inline("fix %r%snake_case [x%r% now"),
            "fix <span style=\"color: #e74c3c\">snake_case [x</span> now"
        );
    }

    #[test]
    fn test_unmatched_color_marker_is_text() {
        assert_eq!(parse_markdown_inline("50%g% off"), "50%g% off");
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown_inline("hi <b>there</b>");
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_block_document() {
        let html = parse_markdown("# Help\n\n- `t @tag title`\n");
        assert!(html.contains("<h1>Help</h1>"));
        assert!(html.contains("<li><code>t @tag title</code></li>"));
    }
}
