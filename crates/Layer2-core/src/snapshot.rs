//! Node Snapshot - 리컨실된 노드 상태
//!
//! 순서 없는 부분 업데이트 스트림(STATUS/RESULT/CACHE/ERROR)으로부터
//! 항상 최신인 단일 뷰를 유지한다. 히스토리는 보존하지 않는다.
//!
//! 스냅샷은 프레젠테이션 루프(단일 소비자 컨텍스트)만 변경한다.
//! 리더 태스크는 채널로 메시지를 넘길 뿐 직접 접근하지 않는다.

use crate::process::NodeEvent;
use crate::protocol::{result_is_miss, NodeMessage, OwnershipRole, StatusClass};

/// 캐시 테이블의 한 행
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: String,
    pub value: String,
    /// 백엔드가 보낸 원본 role 문자열 ("HOME (Master)" 등)
    pub role: String,
}

impl CacheEntry {
    /// 표시용 역할 분류
    pub fn role_class(&self) -> OwnershipRole {
        OwnershipRole::classify(&self.role)
    }
}

/// 노드 한 개의 최신 상태
///
/// 세션 시작 시 생성되고 프로세스가 끝나면 버려진다.
#[derive(Debug, Clone)]
pub struct NodeSnapshot {
    /// 최신 상태 텍스트
    pub status: String,

    /// 마지막 get/put 응답
    pub last_result: String,

    /// last_result가 miss(NOT FOUND)였는지
    pub not_found: bool,

    /// 백엔드가 보고한 마지막 에러
    pub last_error: Option<String>,

    /// key 단위 캐시 테이블 (삽입 순서 유지, key는 유일)
    pub entries: Vec<CacheEntry>,

    /// 노드 프로세스 연결 상태 (스트림이 닫히면 false)
    pub connected: bool,
}

impl NodeSnapshot {
    /// 세션 시작 시 기본값
    pub fn new() -> Self {
        Self {
            status: "STARTING...".to_string(),
            last_result: "Ready.".to_string(),
            not_found: false,
            last_error: None,
            entries: Vec::new(),
            connected: true,
        }
    }

    /// 현재 상태 분류
    pub fn status_class(&self) -> StatusClass {
        StatusClass::classify(&self.status)
    }

    /// 메시지 하나를 스냅샷에 반영
    ///
    /// 실패하지 않고 블로킹하지 않는다. 메시지당 정확히 한 번의 변경.
    pub fn apply(&mut self, msg: NodeMessage) {
        match msg {
            NodeMessage::Status(status) => {
                self.status = status;
            }
            NodeMessage::Result(result) => {
                self.not_found = result_is_miss(&result);
                self.last_result = result;
            }
            NodeMessage::Cache { key, value, role } => {
                self.upsert(key, value, role);
            }
            NodeMessage::Error(error) => {
                // status는 건드리지 않는다
                self.last_error = Some(error);
            }
        }
    }

    /// 프로세스 이벤트를 반영 (메시지 + 종료 신호)
    pub fn apply_event(&mut self, event: NodeEvent) {
        match event {
            NodeEvent::Message(msg) => self.apply(msg),
            NodeEvent::Closed => {
                self.connected = false;
                self.status = "DISCONNECTED: node process exited".to_string();
            }
        }
    }

    /// 백엔드 실행 실패를 합성 상태로 반영 (크래시 대신)
    pub fn mark_launch_failed(&mut self, backend: &str) {
        self.connected = false;
        self.status = format!("ERROR: Missing {}", backend);
    }

    /// key 단위 upsert: 있으면 자리 유지한 채 교체, 없으면 뒤에 추가
    fn upsert(&mut self, key: String, value: String, role: String) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value = value;
            entry.role = role;
        } else {
            self.entries.push(CacheEntry { key, value, role });
        }
    }
}

impl Default for NodeSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(line: &str) -> NodeMessage {
        crate::protocol::parse_line(line).expect("valid protocol line")
    }

    #[test]
    fn test_initial_snapshot() {
        let snap = NodeSnapshot::new();
        assert_eq!(snap.status, "STARTING...");
        assert_eq!(snap.last_result, "Ready.");
        assert!(snap.entries.is_empty());
        assert!(snap.connected);
    }

    #[test]
    fn test_cache_upsert_replaces_in_place() {
        let mut snap = NodeSnapshot::new();
        snap.apply(msg("CACHE|k|v1|HOME"));
        snap.apply(msg("CACHE|other|x|BACKUP"));
        snap.apply(msg("CACHE|k|v2|BACKUP"));

        // 중복 엔트리가 생기지 않고, 자리도 유지된다
        assert_eq!(snap.entries.len(), 2);
        assert_eq!(snap.entries[0].key, "k");
        assert_eq!(snap.entries[0].value, "v2");
        assert_eq!(snap.entries[0].role_class(), OwnershipRole::Backup);
    }

    #[test]
    fn test_status_order_sensitivity() {
        let mut snap = NodeSnapshot::new();
        snap.apply(msg("STATUS|A"));
        snap.apply(msg("STATUS|B"));
        assert_eq!(snap.status, "B");
    }

    #[test]
    fn test_result_miss_flag() {
        let mut snap = NodeSnapshot::new();
        snap.apply(msg("RESULT|Read: ghost NOT FOUND"));
        assert!(snap.not_found);

        snap.apply(msg("RESULT|Read: x = 11"));
        assert!(!snap.not_found);
        assert_eq!(snap.last_result, "Read: x = 11");
    }

    #[test]
    fn test_error_keeps_status() {
        let mut snap = NodeSnapshot::new();
        snap.apply(msg("STATUS|IDLE"));
        snap.apply(msg("ERROR|lock manager timeout"));

        assert_eq!(snap.status, "IDLE");
        assert_eq!(snap.last_error.as_deref(), Some("lock manager timeout"));
    }

    #[test]
    fn test_closed_event_is_terminal_status() {
        let mut snap = NodeSnapshot::new();
        snap.apply_event(NodeEvent::Closed);
        assert!(!snap.connected);
        assert!(snap.status.contains("DISCONNECTED"));
    }

    #[test]
    fn test_launch_failure_synthetic_status() {
        let mut snap = NodeSnapshot::new();
        snap.mark_launch_failed("./build/dsm_headless");
        assert_eq!(snap.status, "ERROR: Missing ./build/dsm_headless");
        assert!(!snap.connected);
    }

    #[test]
    fn test_end_to_end_sequence() {
        let lines = [
            "STATUS|STARTING",
            "CACHE|x|10|HOME",
            "CACHE|y|20|BACKUP",
            "STATUS|IDLE",
            "CACHE|x|11|HOME",
            "RESULT|value=11",
        ];

        let mut snap = NodeSnapshot::new();
        for line in lines {
            snap.apply(msg(line));
        }

        assert_eq!(snap.status, "IDLE");
        assert_eq!(snap.status_class(), StatusClass::Idle);
        assert!(!snap.not_found);
        assert_eq!(snap.last_result, "value=11");

        assert_eq!(snap.entries.len(), 2);
        assert_eq!(snap.entries[0].key, "x");
        assert_eq!(snap.entries[0].value, "11");
        assert_eq!(snap.entries[0].role_class(), OwnershipRole::Home);
        assert_eq!(snap.entries[1].key, "y");
        assert_eq!(snap.entries[1].value, "20");
        assert_eq!(snap.entries[1].role_class(), OwnershipRole::Backup);
    }

    #[test]
    fn test_malformed_lines_do_not_disturb_state() {
        let mut snap = NodeSnapshot::new();
        snap.apply(msg("CACHE|x|10|HOME"));

        // malformed / 비프로토콜 라인은 parse 단계에서 걸러진다
        assert!(crate::protocol::parse_line("CACHE|onlykey").is_none());
        assert!(crate::protocol::parse_line("plain diagnostic text").is_none());

        // 이후의 정상 라인은 그대로 처리된다
        snap.apply(msg("CACHE|x|12|HOME"));
        assert_eq!(snap.entries.len(), 1);
        assert_eq!(snap.entries[0].value, "12");
    }
}
