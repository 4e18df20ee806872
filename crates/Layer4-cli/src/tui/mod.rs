//! Terminal UI for DsmDash
//!
//! 프레젠테이션 계층. 앱 루프가 단일 소비자 컨텍스트이며,
//! 노드 이벤트는 여기서만 스냅샷에 반영된다.

mod app;
mod event;
mod theme;
mod widgets;

pub use app::run;
