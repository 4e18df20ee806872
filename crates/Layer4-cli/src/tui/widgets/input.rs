//! Input box component (Key / Value 입력 필드)

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::theme::Theme;

/// 한 줄짜리 텍스트 입력 박스
pub struct InputBox {
    /// Current input text
    content: String,

    /// 커서 위치 (바이트 오프셋, 항상 char 경계)
    cursor: usize,

    /// Whether the input is focused
    focused: bool,

    /// 보더에 표시할 제목
    title: String,
}

impl InputBox {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            focused: false,
            title: title.into(),
        }
    }

    /// Get current content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Set focus
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// 커서 앞 글자의 바이트 길이 (커서가 맨 앞이면 None)
    fn prev_char_len(&self) -> Option<usize> {
        self.content[..self.cursor]
            .chars()
            .next_back()
            .map(|c| c.len_utf8())
    }

    /// 커서 뒤 글자의 바이트 길이 (커서가 맨 뒤면 None)
    fn next_char_len(&self) -> Option<usize> {
        self.content[self.cursor..].chars().next().map(|c| c.len_utf8())
    }

    /// Handle key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.content.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            KeyCode::Backspace => {
                if let Some(len) = self.prev_char_len() {
                    self.cursor -= len;
                    self.content.remove(self.cursor);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.content.len() {
                    self.content.remove(self.cursor);
                }
            }
            KeyCode::Left => {
                if let Some(len) = self.prev_char_len() {
                    self.cursor -= len;
                }
            }
            KeyCode::Right => {
                if let Some(len) = self.next_char_len() {
                    self.cursor += len;
                }
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.content.len();
            }
            _ => {}
        }
    }

    /// Render the input box
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: Theme) {
        let border_style = if self.focused {
            theme.border_focused()
        } else {
            theme.border()
        };

        let input = Paragraph::new(self.content.clone()).style(theme.text()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", self.title)),
        );

        frame.render_widget(input, area);

        // Show cursor (화면 열은 글자 수 기준)
        if self.focused {
            let column = self.content[..self.cursor].chars().count() as u16;
            frame.set_cursor_position((area.x + column + 1, area.y + 1));
        }
    }
}
