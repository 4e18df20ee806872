//! Wire Protocol - 노드 이벤트 라인 파싱
//!
//! 백엔드 노드는 한 줄에 하나씩 `TYPE|payload` 형식의 이벤트를 출력한다:
//! - `STATUS|<text>`: 새 상태
//! - `RESULT|<text>`: 마지막 get/put 응답 (`NOT FOUND` 포함 시 miss)
//! - `CACHE|key|value|role[|...]`: 캐시 엔트리 전체 교체 (필드 3개 미만은 폐기)
//! - `ERROR|<text>`: 백엔드가 보고한 에러
//!
//! `|`가 없는 줄은 프로토콜이 아닌 진단 출력이며 리컨실러에 전달되지 않는다.

/// 노드가 보낸 단일 이벤트 메시지
///
/// 리더 경계에서 한 번만 디코딩한다. 리컨실러는 문자열 태그 분기 없이
/// variant로만 동작한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeMessage {
    /// 새 상태 텍스트
    Status(String),

    /// 마지막 명령 응답 텍스트
    Result(String),

    /// 캐시 엔트리 교체 (key 단위 upsert 대상)
    Cache {
        key: String,
        value: String,
        role: String,
    },

    /// 백엔드 보고 에러
    Error(String),
}

/// 상태 텍스트 분류 (표시 색상 결정용)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// IDLE 포함
    Idle,
    /// LOCKING 또는 HELD 포함
    Locked,
    /// 그 외 (STARTING, WAITING 등)
    Other,
}

impl StatusClass {
    /// 부분 문자열 규칙으로 상태 분류
    pub fn classify(status: &str) -> Self {
        if status.contains("LOCKING") || status.contains("HELD") {
            StatusClass::Locked
        } else if status.contains("IDLE") {
            StatusClass::Idle
        } else {
            StatusClass::Other
        }
    }
}

/// 캐시 엔트리의 소유권 역할 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipRole {
    /// 이 노드가 키의 주 소유자 (role에 HOME 포함)
    Home,
    /// 이 노드가 복제본 보유 (role에 BACKUP 포함)
    Backup,
    /// 그 외 (캐시 복제 등)
    Other,
}

impl OwnershipRole {
    /// 부분 문자열 규칙으로 역할 분류
    pub fn classify(role: &str) -> Self {
        if role.contains("HOME") {
            OwnershipRole::Home
        } else if role.contains("BACKUP") {
            OwnershipRole::Backup
        } else {
            OwnershipRole::Other
        }
    }
}

/// RESULT payload가 miss인지 확인
pub fn result_is_miss(result: &str) -> bool {
    result.contains("NOT FOUND")
}

/// 노드 출력 한 줄을 파싱
///
/// 반환값:
/// - `Some(NodeMessage)`: 유효한 프로토콜 이벤트
/// - `None`: 진단 출력(`|` 없음), 알 수 없는 태그, 또는 malformed CACHE.
///   어떤 경우에도 에러를 내지 않는다 (리더 루프는 절대 죽지 않는다).
pub fn parse_line(line: &str) -> Option<NodeMessage> {
    // 첫 번째 `|`에서만 분리. payload에는 `|`가 더 있을 수 있다 (CACHE).
    let (tag, payload) = line.split_once('|')?;

    match tag {
        "STATUS" => Some(NodeMessage::Status(payload.to_string())),
        "RESULT" => Some(NodeMessage::Result(payload.to_string())),
        "ERROR" => Some(NodeMessage::Error(payload.to_string())),
        "CACHE" => {
            // CACHE|key|value|role[|...] - 최소 3개 필드, 초과분은 무시
            let mut fields = payload.splitn(4, '|');
            let key = fields.next()?;
            let value = fields.next()?;
            let role = fields.next()?;
            Some(NodeMessage::Cache {
                key: key.to_string(),
                value: value.to_string(),
                role: role.to_string(),
            })
        }
        other => {
            tracing::debug!("Dropping unknown message tag: {}", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(
            parse_line("STATUS|IDLE"),
            Some(NodeMessage::Status("IDLE".to_string()))
        );
    }

    #[test]
    fn test_parse_result() {
        assert_eq!(
            parse_line("RESULT|Read: x = 11"),
            Some(NodeMessage::Result("Read: x = 11".to_string()))
        );
    }

    #[test]
    fn test_parse_cache() {
        assert_eq!(
            parse_line("CACHE|x|10|HOME (Master)"),
            Some(NodeMessage::Cache {
                key: "x".to_string(),
                value: "10".to_string(),
                role: "HOME (Master)".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_cache_extra_fields_ignored() {
        assert_eq!(
            parse_line("CACHE|x|10|BACKUP|extra|junk"),
            Some(NodeMessage::Cache {
                key: "x".to_string(),
                value: "10".to_string(),
                role: "BACKUP".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_cache_malformed_dropped() {
        // 필드 3개 미만이면 폐기 (non-fatal)
        assert_eq!(parse_line("CACHE|onlykey"), None);
        assert_eq!(parse_line("CACHE|key|value"), None);
    }

    #[test]
    fn test_non_protocol_line_ignored() {
        // `|` 없는 줄은 이벤트가 아니다
        assert_eq!(parse_line("grpc server listening on 0.0.0.0:5001"), None);
        assert_eq!(parse_line(""), None);
    }

    #[test]
    fn test_unknown_tag_dropped() {
        assert_eq!(parse_line("METRICS|cpu=3"), None);
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(StatusClass::classify("LOCKING: node 2"), StatusClass::Locked);
        assert_eq!(
            StatusClass::classify("READ LOCK HELD (5s)..."),
            StatusClass::Locked
        );
        assert_eq!(StatusClass::classify("IDLE"), StatusClass::Idle);
        assert_eq!(
            StatusClass::classify("WAITING FOR PEERS (5s)..."),
            StatusClass::Other
        );
    }

    #[test]
    fn test_role_classification() {
        assert_eq!(
            OwnershipRole::classify("HOME (Master)"),
            OwnershipRole::Home
        );
        assert_eq!(OwnershipRole::classify("BACKUP"), OwnershipRole::Backup);
        assert_eq!(
            OwnershipRole::classify("CACHE (Replica)"),
            OwnershipRole::Other
        );
    }

    #[test]
    fn test_result_miss() {
        assert!(result_is_miss("Read: missing-key NOT FOUND"));
        assert!(!result_is_miss("Read: x = 11"));
    }
}
