//! Operator Commands - 백엔드로 보내는 명령
//!
//! 한 줄에 하나씩, 공백 구분 토큰:
//! `get <key>` / `slowget <key>` / `put <key> <value>` / `slowput <key> <value>`

use std::fmt;

/// 오퍼레이터가 노드에 보낼 수 있는 명령 (닫힌 집합)
///
/// slow 변형은 락을 5초간 잡는 지연 주입 버전이다. 락 경합과 캐시
/// invalidation을 눈으로 확인할 때 쓴다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeCommand {
    Get(String),
    SlowGet(String),
    Put(String, String),
    SlowPut(String, String),
}

impl NodeCommand {
    /// 토큰에서 개행/공백을 제거해 한 줄 불변식을 지킨다
    fn token(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join("_")
    }

    pub fn get(key: &str) -> Self {
        NodeCommand::Get(Self::token(key))
    }

    pub fn slow_get(key: &str) -> Self {
        NodeCommand::SlowGet(Self::token(key))
    }

    pub fn put(key: &str, value: &str) -> Self {
        NodeCommand::Put(Self::token(key), Self::token(value))
    }

    pub fn slow_put(key: &str, value: &str) -> Self {
        NodeCommand::SlowPut(Self::token(key), Self::token(value))
    }
}

impl fmt::Display for NodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeCommand::Get(key) => write!(f, "get {}", key),
            NodeCommand::SlowGet(key) => write!(f, "slowget {}", key),
            NodeCommand::Put(key, value) => write!(f, "put {} {}", key, value),
            NodeCommand::SlowPut(key, value) => write!(f, "slowput {} {}", key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        assert_eq!(NodeCommand::get("x").to_string(), "get x");
        assert_eq!(NodeCommand::slow_get("x").to_string(), "slowget x");
        assert_eq!(NodeCommand::put("x", "11").to_string(), "put x 11");
        assert_eq!(NodeCommand::slow_put("x", "11").to_string(), "slowput x 11");
    }

    #[test]
    fn test_tokens_are_single_line() {
        // 개행이 섞여도 한 줄 명령이 깨지지 않는다
        let cmd = NodeCommand::put("a\nb", "c d");
        assert_eq!(cmd.to_string(), "put a_b c_d");
        assert!(!cmd.to_string().contains('\n'));
    }
}
