//! Terminal event pump for the dashboard

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// 대시보드 터미널 이벤트
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Key press
    Key(KeyEvent),

    /// Terminal resize
    Resize,

    /// 주기적 리드로우 틱
    Tick,

    /// Quit request (Ctrl+C / Esc)
    Quit,
}

/// 백그라운드에서 crossterm 이벤트를 퍼올리는 펌프
pub struct EventPump {
    rx: mpsc::UnboundedReceiver<TuiEvent>,
}

impl EventPump {
    /// 펌프 태스크를 띄우고 수신 핸들을 돌려준다
    pub fn spawn(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => {
                            let ctrl_c = key.code == KeyCode::Char('c')
                                && key.modifiers.contains(KeyModifiers::CONTROL);
                            if ctrl_c || key.code == KeyCode::Esc {
                                let _ = tx.send(TuiEvent::Quit);
                                break;
                            }
                            let _ = tx.send(TuiEvent::Key(key));
                        }
                        Ok(Event::Resize(_, _)) => {
                            let _ = tx.send(TuiEvent::Resize);
                        }
                        _ => {}
                    }
                }

                if tx.send(TuiEvent::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receive next event
    pub async fn next(&mut self) -> Option<TuiEvent> {
        self.rx.recv().await
    }
}
