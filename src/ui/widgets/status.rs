//! Status widget - host backdrop behind the overlay: environment, sample keys, status line

use crate::demo::Sample;
use crate::env::Env;
use crate::ui::theme::Palette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct StatusWidget<'a> {
    env: Env,
    entry_count: usize,
    status_message: Option<&'a str>,
    palette: Palette,
}

impl<'a> StatusWidget<'a> {
    pub fn new(env: Env, entry_count: usize, status_message: Option<&'a str>, palette: Palette) -> Self {
        Self {
            env,
            entry_count,
            status_message,
            palette,
        }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = self.palette.muted();
        let value = Style::new().fg(self.palette.text);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("  Environment  ", label),
                Span::styled(self.env.as_str(), value.add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("  Entries      ", label),
                Span::styled(self.entry_count.to_string(), value),
            ]),
            Line::default(),
            Line::from(Span::styled("  Samples", label)),
        ];

        for (i, sample) in Sample::ALL.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("    {} ", i + 1), value.add_modifier(Modifier::BOLD)),
                Span::styled(sample.to_string(), value),
            ]));
        }

        lines.push(Line::from(vec![
            Span::styled("    ! ", value.add_modifier(Modifier::BOLD)),
            Span::styled("panic", value),
        ]));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "  space panel  ↑↓ select  enter expand  q quit",
            label,
        )));

        if let Some(msg) = self.status_message {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(format!("  {}", msg), value)));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border())
            .title(Span::styled(" devlog ", self.palette.title()));

        Paragraph::new(lines)
            .block(block)
            .style(self.palette.base())
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
