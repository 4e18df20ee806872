//! Cache Table Widget - 노드 스토리지 테이블
//!
//! Key / Value / Role 세 컬럼. 행 배경은 소유권 역할(Home/Backup)에 따라
//! 틴트된다. 엔트리 순서는 스냅샷의 삽입 순서 그대로 (upsert가 자리를
//! 보존하므로 표시가 흔들리지 않는다).

use dsm_core::NodeSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Row, Table, Widget},
};

use crate::tui::theme::Theme;

pub struct CacheTable<'a> {
    snapshot: &'a NodeSnapshot,
    theme: Theme,
}

impl<'a> CacheTable<'a> {
    pub fn new(snapshot: &'a NodeSnapshot, theme: Theme) -> Self {
        Self { snapshot, theme }
    }
}

impl Widget for CacheTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(vec!["Object Key", "Data Value", "Ownership Role"])
            .style(self.theme.header());

        let rows: Vec<Row> = self
            .snapshot
            .entries
            .iter()
            .map(|entry| {
                Row::new(vec![
                    entry.key.clone(),
                    entry.value.clone(),
                    entry.role.clone(),
                ])
                .style(self.theme.role_row(entry.role_class()))
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(45),
                Constraint::Percentage(30),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border())
                .title(" Node Storage (Home & Cache) "),
        );

        table.render(area, buf);
    }
}
