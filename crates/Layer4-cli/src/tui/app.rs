//! Main TUI application
//!
//! 앱 루프가 스냅샷의 유일한 변경 지점이다. 리더 태스크가 보낸 노드
//! 이벤트는 FIFO 채널로 이 루프에 들어와 순서대로 반영되고, 다음 draw가
//! 새 스냅샷을 그대로 다시 그린다 (idempotent re-render).

use crate::tui::event::{EventPump, TuiEvent};
use crate::tui::theme::Theme;
use crate::tui::widgets::{CacheTable, Header, InputBox, ResultPanel, StatusPanel};
use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dsm_core::{NodeCommand, NodeEvent, NodeProcess, NodeSnapshot};
use dsm_foundation::MonitorConfig;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI application
pub async fn run(config: &MonitorConfig, node_id: &str) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state and launch the backend node
    let mut app = App::new(config.clone(), node_id.to_string());

    // Channel for node events (리더가 관찰한 순서 그대로)
    let mut node_rx: Option<mpsc::UnboundedReceiver<NodeEvent>> = app.launch_node();

    let mut events = EventPump::spawn(Duration::from_millis(100));

    // Main loop - 단일 소비자 컨텍스트
    loop {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            // Terminal events
            Some(event) = events.next() => {
                match event {
                    TuiEvent::Quit => break,
                    TuiEvent::Key(key) => app.handle_key(key).await,
                    TuiEvent::Resize | TuiEvent::Tick => {}
                }
            }

            // Node events
            Some(node_event) = async {
                match node_rx.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                let closed = app.on_node_event(node_event);
                if closed {
                    node_rx = if app.config.restart {
                        tracing::info!("Node exited, relaunching (restart enabled)");
                        app.launch_node()
                    } else {
                        None
                    };
                }
            }
        }
    }

    // 세션 종료: 자식 프로세스를 내리면 리더는 EOF로 풀려난다
    if let Some(process) = &app.process {
        process.terminate().await;
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// 입력 포커스
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Key,
    Value,
}

/// Main application state
struct App {
    config: MonitorConfig,
    node_id: String,
    theme: Theme,

    /// 리컨실된 노드 상태 (이 루프에서만 변경)
    snapshot: NodeSnapshot,

    /// 백엔드 프로세스 핸들
    process: Option<NodeProcess>,

    key_input: InputBox,
    value_input: InputBox,
    focus: Focus,
}

impl App {
    fn new(config: MonitorConfig, node_id: String) -> Self {
        let theme = Theme::from_name(&config.theme);
        let mut key_input = InputBox::new("Key");
        key_input.set_focused(true);

        Self {
            config,
            node_id,
            theme,
            snapshot: NodeSnapshot::new(),
            process: None,
            key_input,
            value_input: InputBox::new("Value"),
            focus: Focus::Key,
        }
    }

    /// 백엔드 실행. 실패는 합성 상태로만 반영된다 (세션은 열린 채 유지,
    /// 명령은 no-op이 된다).
    fn launch_node(&mut self) -> Option<mpsc::UnboundedReceiver<NodeEvent>> {
        self.snapshot = NodeSnapshot::new();

        match NodeProcess::spawn(
            &self.config.backend,
            &self.node_id,
            &self.config.cluster_config,
        ) {
            Ok((process, rx)) => {
                self.process = Some(process);
                Some(rx)
            }
            Err(e) => {
                tracing::error!("Failed to launch node backend: {}", e);
                self.snapshot
                    .mark_launch_failed(&self.config.backend.display().to_string());
                None
            }
        }
    }

    /// 노드 이벤트 반영 (리컨실레이션 지점). 스트림 종료면 true.
    fn on_node_event(&mut self, event: NodeEvent) -> bool {
        let closed = event == NodeEvent::Closed;
        self.snapshot.apply_event(event);

        if closed {
            self.process = None;
        }
        closed
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Key => Focus::Value,
            Focus::Value => Focus::Key,
        };
        self.key_input.set_focused(self.focus == Focus::Key);
        self.value_input.set_focused(self.focus == Focus::Value);
    }

    /// 단축키에 해당하는 명령 구성 (빈 필드면 None)
    fn command_for(&self, code: KeyCode) -> Option<NodeCommand> {
        let key = self.key_input.content();
        let value = self.value_input.content();

        match code {
            KeyCode::F(1) if !key.is_empty() => Some(NodeCommand::get(key)),
            KeyCode::F(2) if !key.is_empty() => Some(NodeCommand::slow_get(key)),
            KeyCode::F(3) if !key.is_empty() && !value.is_empty() => {
                Some(NodeCommand::put(key, value))
            }
            KeyCode::F(4) if !key.is_empty() && !value.is_empty() => {
                Some(NodeCommand::slow_put(key, value))
            }
            _ => None,
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::F(_) => {
                if let Some(cmd) = self.command_for(key.code) {
                    // send는 liveness를 스스로 재확인한다
                    if let Some(process) = &self.process {
                        process.send(&cmd).await;
                    }
                }
            }
            _ => match self.focus {
                Focus::Key => self.key_input.handle_key(key),
                Focus::Value => self.value_input.handle_key(key),
            },
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Length(4), // status (+ error line)
                Constraint::Length(3), // result
                Constraint::Min(6),    // cache table
                Constraint::Length(3), // inputs
                Constraint::Length(1), // keybind hints
            ])
            .split(frame.area());

        frame.render_widget(
            Header::new(&self.node_id, self.snapshot.connected, self.theme),
            chunks[0],
        );
        frame.render_widget(StatusPanel::new(&self.snapshot, self.theme), chunks[1]);
        frame.render_widget(ResultPanel::new(&self.snapshot, self.theme), chunks[2]);
        frame.render_widget(CacheTable::new(&self.snapshot, self.theme), chunks[3]);

        let inputs = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[4]);
        self.key_input.render(frame, inputs[0], self.theme);
        self.value_input.render(frame, inputs[1], self.theme);

        frame.render_widget(self.hints(), chunks[5]);
    }

    /// 하단 단축키 힌트 라인
    fn hints(&self) -> Paragraph<'static> {
        let mut spans = vec![Span::raw(" ")];
        let items = [
            ("Tab", "field"),
            ("F1", "get"),
            ("F2", "slow get"),
            ("F3", "put"),
            ("F4", "slow put"),
            ("Ctrl+C", "quit"),
        ];

        for (i, (key, desc)) in items.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", self.theme.text_muted()));
            }
            spans.push(Span::styled(key.to_string(), self.theme.keybind()));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(desc.to_string(), self.theme.keybind_desc()));
        }

        Paragraph::new(Line::from(spans))
    }
}
