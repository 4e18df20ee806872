//! Status / Result 패널
//!
//! ```text
//! ┌ System Status ──────────────┐
//! │ IDLE                        │
//! │ ERROR: lock manager timeout │   <- last_error 있을 때만
//! └─────────────────────────────┘
//! ┌ Server Response ────────────┐
//! │ Read: x = 11                │
//! └─────────────────────────────┘
//! ```

use dsm_core::NodeSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// 시스템 상태 패널 (StatusClass에 따라 색이 바뀐다)
pub struct StatusPanel<'a> {
    snapshot: &'a NodeSnapshot,
    theme: Theme,
}

impl<'a> StatusPanel<'a> {
    pub fn new(snapshot: &'a NodeSnapshot, theme: Theme) -> Self {
        Self { snapshot, theme }
    }
}

impl Widget for StatusPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(" System Status ");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from(Span::styled(
            self.snapshot.status.clone(),
            self.theme.status(self.snapshot.status_class()),
        ))];

        if let Some(error) = &self.snapshot.last_error {
            lines.push(Line::from(Span::styled(
                format!("ERROR: {}", error),
                self.theme.error(),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

/// 서버 응답 패널 (miss는 에러 색으로 강조)
pub struct ResultPanel<'a> {
    snapshot: &'a NodeSnapshot,
    theme: Theme,
}

impl<'a> ResultPanel<'a> {
    pub fn new(snapshot: &'a NodeSnapshot, theme: Theme) -> Self {
        Self { snapshot, theme }
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(" Server Response ");
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Line::from(Span::styled(
            self.snapshot.last_result.clone(),
            self.theme.result(self.snapshot.not_found),
        )))
        .render(inner, buf);
    }
}
