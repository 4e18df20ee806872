//! Header Widget - 노드 식별자와 연결 상태

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// 대시보드 상단 헤더
pub struct Header<'a> {
    node_id: &'a str,
    connected: bool,
    theme: Theme,
}

impl<'a> Header<'a> {
    pub fn new(node_id: &'a str, connected: bool, theme: Theme) -> Self {
        Self {
            node_id,
            connected,
            theme,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border());
        let inner = block.inner(area);
        block.render(area, buf);

        let (dot, dot_style) = if self.connected {
            ("●", Style::default().fg(self.theme.status_idle))
        } else {
            ("○", self.theme.error())
        };

        let line = Line::from(vec![
            Span::styled(
                format!(" DSM Node {} - Dashboard ", self.node_id),
                self.theme.header(),
            ),
            Span::styled(dot, dot_style),
        ]);

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
