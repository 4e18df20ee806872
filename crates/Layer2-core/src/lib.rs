//! # dsm-core
//!
//! Core runtime for DsmDash:
//! - Protocol: 노드 이벤트 라인 프로토콜 (`TYPE|payload`) 파싱 및 분류
//! - Command: 오퍼레이터 명령 (get/put + slow 변형)
//! - Snapshot: 노드 상태 스냅샷 + 리컨실러 (status / result / cache upsert)
//! - Process: 백엔드 노드 프로세스 슈퍼바이저 (spawn, reader/writer task)
//!
//! ## 데이터 흐름
//!
//! ```text
//! operator ──► NodeCommand ──► child stdin
//! child stdout ──► reader task ──► NodeMessage ──► mpsc (FIFO)
//!                                                    │
//!                                 presentation loop ─┴─► NodeSnapshot::apply
//! ```
//!
//! 리더 태스크는 스냅샷을 직접 건드리지 않는다. 모든 메시지는 FIFO 채널을
//! 거쳐 단일 소비자 컨텍스트(TUI 루프)에서 반영된다.

pub mod command;
pub mod process;
pub mod protocol;
pub mod snapshot;

pub use command::NodeCommand;
pub use process::{NodeEvent, NodeProcess};
pub use protocol::{parse_line, NodeMessage, OwnershipRole, StatusClass};
pub use snapshot::{CacheEntry, NodeSnapshot};
