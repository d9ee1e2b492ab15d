//! Log panel widget - floating overlay in the bottom-right corner
//!
//! Collapsed: a small badge with the entry count.
//! Expanded: header, entries (newest at the bottom), key hints.

use crate::constants::{BADGE_HEIGHT, BADGE_WIDTH, PANEL_WIDTH};
use crate::env::Env;
use crate::ui::json::value_lines;
use crate::ui::theme::{level_color, Palette, SYMBOL_COPIED, SYMBOL_EMPTY, SYMBOL_PINNED};
use crate::ui::view::{format_time, Row};
use crate::value::Value;
use crate::logging::format::primitive_to_string;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

pub struct LogPanel<'a> {
    rows: &'a [Row],
    entry_count: usize,
    expanded: bool,
    pinned: bool,
    /// Selected row (index into `rows`)
    selected: Option<usize>,
    /// Entry index showing the copied marker
    copied: Option<usize>,
    /// Expand every nested container of the selected row
    deep: bool,
    env: Env,
    palette: Palette,
}

impl<'a> LogPanel<'a> {
    pub fn new(rows: &'a [Row], entry_count: usize, env: Env, palette: Palette) -> Self {
        Self {
            rows,
            entry_count,
            expanded: false,
            pinned: false,
            selected: None,
            copied: None,
            deep: false,
            env,
            palette,
        }
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn copied(mut self, copied: Option<usize>) -> Self {
        self.copied = copied;
        self
    }

    pub fn deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }
}

/// Where the panel sits inside `area`
pub fn panel_area(area: Rect, expanded: bool, pinned: bool) -> Rect {
    let (width, height) = if !expanded {
        (BADGE_WIDTH, BADGE_HEIGHT)
    } else if pinned {
        (PANEL_WIDTH, area.height)
    } else {
        (PANEL_WIDTH, (area.height / 2).max(BADGE_HEIGHT + 2))
    };

    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = panel_area(area, self.expanded, self.pinned);
        Clear.render(area, buf);

        if self.expanded {
            self.render_panel(area, buf);
        } else {
            self.render_badge(area, buf);
        }
    }
}

impl LogPanel<'_> {
    fn render_badge(&self, area: Rect, buf: &mut Buffer) {
        let (label, color) = if self.entry_count > 0 {
            (self.entry_count.to_string(), self.palette.badge_active)
        } else {
            (SYMBOL_EMPTY.to_string(), self.palette.badge_idle)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::new().fg(color));

        Paragraph::new(Line::from(Span::styled(
            label,
            Style::new().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(block)
        .style(self.palette.base())
        .render(area, buf);
    }

    fn render_panel(&self, area: Rect, buf: &mut Buffer) {
        let mut title = vec![Span::styled(
            format!(" Logger ({}) ", self.entry_count),
            self.palette.title(),
        )];
        title.push(Span::styled(format!("[{}] ", self.env), self.palette.muted()));
        if self.pinned {
            title.push(Span::raw(format!("{} ", SYMBOL_PINNED)));
        }

        let hints = Line::from(Span::styled(
            " c clear  y copy  x export  p pin  t theme  e env ",
            self.palette.muted(),
        ));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border())
            .title(Line::from(title))
            .title_bottom(hints)
            .style(self.palette.base());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() {
            Paragraph::new(Line::from(Span::styled("No logs yet...", self.palette.muted())))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let (lines, selected_start) = self.build_lines(inner.width as usize);
        let height = inner.height as usize;
        let offset = scroll_offset(lines.len(), height, selected_start);

        let visible: Vec<Line> = lines.into_iter().skip(offset).take(height).collect();
        Paragraph::new(visible).render(inner, buf);
    }

    /// All lines of all rows, plus the first line index of the selected row
    fn build_lines(&self, width: usize) -> (Vec<Line<'static>>, Option<usize>) {
        let mut lines = Vec::new();
        let mut selected_start = None;

        for (i, row) in self.rows.iter().enumerate() {
            let is_selected = self.selected == Some(i);
            if is_selected {
                selected_start = Some(lines.len());
            }

            let color = level_color(&row.entry.level);
            let mut header = vec![
                Span::styled(if is_selected { "› " } else { "  " }, self.palette.muted()),
                Span::styled(
                    format!("{} ", format_time(Some(&row.entry.timestamp))),
                    self.palette.muted(),
                ),
                Span::styled(
                    format!("{:<7}", row.entry.level.as_str()),
                    Style::new().fg(color).add_modifier(Modifier::BOLD),
                ),
            ];
            if row.count > 1 {
                header.push(Span::styled(format!(" ×{}", row.count), self.palette.muted()));
            }
            if self.copied == Some(row.index) {
                header.push(Span::styled(format!(" {}", SYMBOL_COPIED), Style::new().fg(color)));
            }
            lines.push(Line::from(header));

            let open_depth = if is_selected && self.deep { usize::MAX } else { 1 };
            for line in body_lines(&row.entry.data, &row.entry.message, open_depth, color) {
                lines.push(indent(line));
            }

            if i + 1 < self.rows.len() {
                lines.push(Line::from(Span::styled(
                    "─".repeat(width.saturating_sub(2)),
                    self.palette.border(),
                )));
            }
        }

        (lines, selected_start)
    }
}

/// Body of an entry: primitive arguments inline, structured arguments as
/// trees. Entries without data show their message.
fn body_lines(
    data: &[Value],
    message: &str,
    open_depth: usize,
    color: ratatui::style::Color,
) -> Vec<Line<'static>> {
    let style = Style::new().fg(color);
    if data.is_empty() {
        return message
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
    }

    let mut lines = Vec::new();
    let mut inline: Vec<String> = Vec::new();

    for value in data {
        if value.is_structured() {
            if !inline.is_empty() {
                lines.extend(text_lines(&inline.join(" "), style));
                inline.clear();
            }
            lines.extend(value_lines(value, open_depth, color));
        } else {
            inline.push(primitive_to_string(value));
        }
    }
    if !inline.is_empty() {
        lines.extend(text_lines(&inline.join(" "), style));
    }

    lines
}

fn text_lines(text: &str, style: Style) -> Vec<Line<'static>> {
    text.lines()
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect()
}

fn indent(mut line: Line<'static>) -> Line<'static> {
    line.spans.insert(0, Span::raw("    "));
    line
}

/// First visible line: the tail by default, moved up to keep the selected
/// row's first line on screen
pub fn scroll_offset(total: usize, height: usize, selected_start: Option<usize>) -> usize {
    let tail = total.saturating_sub(height);
    match selected_start {
        Some(start) if start < tail => start,
        _ => tail,
    }
}
