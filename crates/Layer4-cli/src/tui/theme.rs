//! Theme System - DsmDash TUI 테마 및 스타일 정의
//!
//! 원래 대시보드의 색 규칙을 따른다:
//! 상태는 Idle=green / Locked=red / 그 외=blue, miss 결과는 red,
//! 캐시 행은 Home=green 배경 / Backup=amber 배경.

use dsm_core::{OwnershipRole, StatusClass};
use ratatui::style::{Color, Modifier, Style};

/// DsmDash 테마
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// 기본 텍스트
    pub fg: Color,
    /// 뮤트된 텍스트 (보조 정보)
    pub muted: Color,
    /// 강조색
    pub accent: Color,
    /// 보더 색상
    pub border: Color,
    /// IDLE 상태
    pub status_idle: Color,
    /// LOCKING/HELD 상태
    pub status_locked: Color,
    /// 그 외 상태 (STARTING 등)
    pub status_other: Color,
    /// 에러 텍스트 / miss 결과
    pub error: Color,
    /// HOME 행 배경
    pub home_bg: Color,
    /// BACKUP 행 배경
    pub backup_bg: Color,
}

impl Theme {
    /// 다크 테마 (기본)
    pub fn dark() -> Self {
        Self {
            fg: Color::Rgb(238, 238, 238),          // #eeeeee
            muted: Color::Rgb(128, 128, 140),       // #80808c
            accent: Color::Rgb(120, 180, 255),      // #78b4ff
            border: Color::Rgb(60, 60, 70),         // #3c3c46
            status_idle: Color::Rgb(0, 255, 0),     // #00ff00
            status_locked: Color::Rgb(255, 68, 68), // #ff4444
            status_other: Color::Rgb(68, 136, 255), // #4488ff
            error: Color::Rgb(255, 68, 68),
            home_bg: Color::Rgb(30, 77, 43),        // #1e4d2b
            backup_bg: Color::Rgb(92, 58, 0),       // #5c3a00
        }
    }

    /// 라이트 테마
    pub fn light() -> Self {
        Self {
            fg: Color::Rgb(30, 30, 40),
            muted: Color::Rgb(120, 120, 130),
            accent: Color::Rgb(0, 100, 200),
            border: Color::Rgb(200, 200, 210),
            status_idle: Color::Rgb(30, 150, 80),
            status_locked: Color::Rgb(200, 60, 60),
            status_other: Color::Rgb(0, 120, 200),
            error: Color::Rgb(200, 60, 60),
            home_bg: Color::Rgb(200, 235, 210),
            backup_bg: Color::Rgb(245, 225, 180),
        }
    }

    /// 이름으로 테마 선택 (알 수 없으면 다크)
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    // === 스타일 헬퍼 메서드 ===

    /// 기본 텍스트 스타일
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// 뮤트된 텍스트
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// 헤더 스타일
    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// 보더 스타일
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// 보더 강조 스타일 (포커스된 입력)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// 에러 스타일
    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// 상태 분류별 스타일
    pub fn status(&self, class: StatusClass) -> Style {
        let color = match class {
            StatusClass::Idle => self.status_idle,
            StatusClass::Locked => self.status_locked,
            StatusClass::Other => self.status_other,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// 결과 스타일 (miss는 에러 색)
    pub fn result(&self, miss: bool) -> Style {
        if miss {
            self.error()
        } else {
            Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
        }
    }

    /// 캐시 행 스타일 (역할별 배경 틴트)
    pub fn role_row(&self, role: OwnershipRole) -> Style {
        match role {
            OwnershipRole::Home => Style::default().fg(Color::White).bg(self.home_bg),
            OwnershipRole::Backup => Style::default().fg(Color::White).bg(self.backup_bg),
            OwnershipRole::Other => self.text(),
        }
    }

    /// 단축키 힌트 스타일
    pub fn keybind(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// 단축키 설명 스타일
    pub fn keybind_desc(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_styles_differ_by_class() {
        let theme = Theme::dark();
        let idle = theme.status(StatusClass::Idle);
        let locked = theme.status(StatusClass::Locked);
        assert_ne!(idle.fg, locked.fg);
    }

    #[test]
    fn test_from_name_falls_back_to_dark() {
        let dark = Theme::from_name("no-such-theme");
        assert_eq!(format!("{:?}", dark.fg), format!("{:?}", Theme::dark().fg));
    }
}
