//! Collapsible JSON tree for structured log arguments
//!
//! Containers shallower than `open_depth` are expanded; deeper ones collapse
//! to a summary (`▶ [3 items]`, `▶ {2 keys}`). A container that contains
//! itself renders the back-reference as `[Circular]`.

use crate::constants::CIRCULAR_SENTINEL;
use crate::ui::theme::{
    COLOR_JSON_BOOL, COLOR_JSON_NULL, COLOR_JSON_NUMBER, COLOR_JSON_STRING, SYMBOL_COLLAPSED,
    SYMBOL_EXPANDED,
};
use crate::value::{format_number, Value};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const INDENT: &str = "  ";

/// Render a value as tree lines
pub fn value_lines(value: &Value, open_depth: usize, text: Color) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    let mut ancestors = Vec::new();
    render(value, None, 0, open_depth, text, &mut ancestors, &mut out);
    out
}

fn render(
    value: &Value,
    key: Option<&str>,
    depth: usize,
    open_depth: usize,
    text: Color,
    ancestors: &mut Vec<usize>,
    out: &mut Vec<Line<'static>>,
) {
    let mut spans = vec![Span::raw(INDENT.repeat(depth))];
    if let Some(key) = key {
        spans.push(Span::styled(format!("{}: ", key), Style::new().fg(text)));
    }

    if let Some(id) = value.ref_id() {
        if ancestors.contains(&id) {
            spans.push(Span::styled(CIRCULAR_SENTINEL, Style::new().fg(COLOR_JSON_NULL)));
            out.push(Line::from(spans));
            return;
        }
    }

    match value {
        Value::Array(arr) => {
            let Ok(items) = arr.try_borrow() else {
                spans.push(Span::styled(value.type_tag(), Style::new().fg(COLOR_JSON_NULL)));
                out.push(Line::from(spans));
                return;
            };
            if items.is_empty() {
                spans.push(Span::styled("[]", Style::new().fg(text)));
                out.push(Line::from(spans));
            } else if depth >= open_depth {
                spans.push(Span::styled(
                    format!("{} [{} items]", SYMBOL_COLLAPSED, items.len()),
                    Style::new().fg(COLOR_JSON_NULL),
                ));
                out.push(Line::from(spans));
            } else {
                spans.push(Span::styled(
                    format!("{} [", SYMBOL_EXPANDED),
                    Style::new().fg(text),
                ));
                out.push(Line::from(spans));
                ancestors.extend(value.ref_id());
                for item in items.iter() {
                    render(item, None, depth + 1, open_depth, text, ancestors, out);
                }
                ancestors.pop();
                out.push(closing(depth, "]", text));
            }
        }
        Value::Object(obj) => {
            let Ok(members) = obj.try_borrow() else {
                spans.push(Span::styled(value.type_tag(), Style::new().fg(COLOR_JSON_NULL)));
                out.push(Line::from(spans));
                return;
            };
            if members.is_empty() {
                spans.push(Span::styled("{}", Style::new().fg(text)));
                out.push(Line::from(spans));
            } else if depth >= open_depth {
                spans.push(Span::styled(
                    format!("{} {{{} keys}}", SYMBOL_COLLAPSED, members.len()),
                    Style::new().fg(COLOR_JSON_NULL),
                ));
                out.push(Line::from(spans));
            } else {
                spans.push(Span::styled(
                    format!("{} {{", SYMBOL_EXPANDED),
                    Style::new().fg(text),
                ));
                out.push(Line::from(spans));
                ancestors.extend(value.ref_id());
                for (k, member) in members.iter() {
                    render(member, Some(k), depth + 1, open_depth, text, ancestors, out);
                }
                ancestors.pop();
                out.push(closing(depth, "}", text));
            }
        }
        primitive => {
            spans.push(primitive_span(primitive));
            out.push(Line::from(spans));
        }
    }
}

fn closing(depth: usize, bracket: &'static str, text: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw(INDENT.repeat(depth)),
        Span::styled(bracket, Style::new().fg(text)),
    ])
}

fn primitive_span(value: &Value) -> Span<'static> {
    match value {
        Value::String(s) => Span::styled(format!("\"{}\"", s), Style::new().fg(COLOR_JSON_STRING)),
        Value::Number(n) => Span::styled(format_number(*n), Style::new().fg(COLOR_JSON_NUMBER)),
        Value::BigInt(n) => Span::styled(format!("{}n", n), Style::new().fg(COLOR_JSON_NUMBER)),
        Value::Bool(b) => Span::styled(b.to_string(), Style::new().fg(COLOR_JSON_BOOL)),
        Value::Null => Span::styled("null", Style::new().fg(COLOR_JSON_NULL)),
        Value::Undefined => Span::styled("undefined", Style::new().fg(COLOR_JSON_NULL)),
        other => Span::styled(other.type_tag(), Style::new().fg(COLOR_JSON_NULL)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_root_expanded_nested_collapsed() {
        let value = Value::object()
            .with("name", "root")
            .with("inner", Value::object().with("a", 1).with("b", 2));

        let lines = plain(&value_lines(&value, 1, Color::White));
        assert_eq!(
            lines,
            vec!["▼ {", "  name: \"root\"", "  inner: ▶ {2 keys}", "}"]
        );
    }

    #[test]
    fn test_fully_expanded() {
        let value = Value::array([Value::from(1), Value::array([Value::Null])]);

        let lines = plain(&value_lines(&value, usize::MAX, Color::White));
        assert_eq!(lines, vec!["▼ [", "  1", "  ▼ [", "    null", "  ]", "]"]);
    }

    #[test]
    fn test_cycle_renders_sentinel() {
        let value = Value::object();
        value.set("self", value.clone());

        let lines = plain(&value_lines(&value, usize::MAX, Color::White));
        assert_eq!(lines, vec!["▼ {", "  self: [Circular]", "}"]);
    }

    #[test]
    fn test_shared_sibling_is_not_circular() {
        let shared = Value::array([Value::from(true)]);
        let value = Value::array([shared.clone(), shared]);

        let lines = plain(&value_lines(&value, usize::MAX, Color::White));
        assert!(!lines.iter().any(|l| l.contains(CIRCULAR_SENTINEL)));
    }

    #[test]
    fn test_empty_containers() {
        let lines = plain(&value_lines(&Value::object(), 1, Color::White));
        assert_eq!(lines, vec!["{}"]);
    }
}
