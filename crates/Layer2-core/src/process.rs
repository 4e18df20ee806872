//! Node Process Supervisor - 백엔드 노드 프로세스 관리
//!
//! 백엔드 바이너리를 `backend <nodeId> <configPath>`로 실행하고 세 개의
//! 스트림을 소유한다:
//! - stdin: 명령 입력 (writer task, 명령마다 flush)
//! - stdout: 이벤트 출력 (reader task → FIFO 채널 → 리컨실러)
//! - stderr: 진단 출력 (tracing 로그로만 전달)
//!
//! 재시작/백오프는 여기서 하지 않는다. 스트림이 닫히면 `NodeEvent::Closed`를
//! 한 번 보내고 끝난다. 재시작 여부는 호출자(설정)의 몫이다.

use crate::command::NodeCommand;
use crate::protocol::{parse_line, NodeMessage};
use dsm_foundation::{Error, Result};
use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info};

/// 슈퍼바이저가 프레젠테이션 루프로 넘기는 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeEvent {
    /// 디코딩된 프로토콜 메시지
    Message(NodeMessage),

    /// 이벤트 스트림 종료 (프로세스 종료 또는 파이프 단절). 터미널 신호.
    Closed,
}

/// 실행 중인 백엔드 노드 프로세스 핸들
pub struct NodeProcess {
    /// 자식 프로세스
    child: Arc<Mutex<Option<Child>>>,

    /// stdin writer 채널
    stdin_tx: mpsc::Sender<String>,

    /// 프로세스 생존 상태
    alive: Arc<AtomicBool>,
}

impl NodeProcess {
    /// 백엔드 실행 및 reader/writer task 시작
    ///
    /// 반환된 수신자는 리더가 관찰한 순서 그대로(FIFO) 이벤트를 전달한다.
    /// 언바운드 채널이므로 리더는 소비자를 기다리느라 멈추지 않고,
    /// 메시지는 유실 대신 큐잉된다.
    pub fn spawn(
        backend: &Path,
        node_id: &str,
        cluster_config: &Path,
    ) -> Result<(Self, mpsc::UnboundedReceiver<NodeEvent>)> {
        info!(
            "Spawning DSM node: {} {} {}",
            backend.display(),
            node_id,
            cluster_config.display()
        );

        let mut cmd = Command::new(backend);
        cmd.arg(node_id)
            .arg(cluster_config)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|_| Error::launch(backend.display().to_string()))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Process("Failed to capture stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Process("Failed to capture stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Process("Failed to capture stderr".to_string()))?;

        // 명령 전송용 채널
        let (stdin_tx, mut stdin_rx) = mpsc::channel::<String>(32);

        // 이벤트 전달용 채널 (FIFO, 단일 소비자)
        let (event_tx, event_rx) = mpsc::unbounded_channel::<NodeEvent>();

        let alive = Arc::new(AtomicBool::new(true));
        let alive_for_writer = Arc::clone(&alive);
        let alive_for_reader = Arc::clone(&alive);

        // stdin writer task - 명령마다 즉시 flush
        let mut stdin_writer = stdin;
        tokio::spawn(async move {
            while let Some(line) = stdin_rx.recv().await {
                if let Err(e) = stdin_writer.write_all(line.as_bytes()).await {
                    error!("Failed to write to node stdin: {}", e);
                    alive_for_writer.store(false, Ordering::SeqCst);
                    break;
                }
                if let Err(e) = stdin_writer.flush().await {
                    error!("Failed to flush node stdin: {}", e);
                    alive_for_writer.store(false, Ordering::SeqCst);
                    break;
                }
            }
        });

        // stdout reader task - 스트림이 닫힐 때까지 한 줄씩
        let mut reader = BufReader::new(stdout).lines();
        tokio::spawn(async move {
            while let Ok(Some(line)) = reader.next_line().await {
                match parse_line(&line) {
                    Some(msg) => {
                        // 소비자가 사라졌으면 더 읽을 이유가 없다
                        if event_tx.send(NodeEvent::Message(msg)).is_err() {
                            break;
                        }
                    }
                    None => {
                        // 비프로토콜 진단 출력 또는 malformed 라인
                        debug!(target: "node", "{}", line);
                    }
                }
            }
            alive_for_reader.store(false, Ordering::SeqCst);
            let _ = event_tx.send(NodeEvent::Closed);
            info!("Node stdout reader finished");
        });

        // stderr reader task - 로그로만 전달
        let mut err_reader = BufReader::new(stderr).lines();
        tokio::spawn(async move {
            while let Ok(Some(line)) = err_reader.next_line().await {
                debug!(target: "node", "stderr: {}", line);
            }
        });

        Ok((
            Self {
                child: Arc::new(Mutex::new(Some(child))),
                stdin_tx,
                alive,
            },
            event_rx,
        ))
    }

    /// 프로세스 생존 여부
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// 명령 전송
    ///
    /// 프로세스가 죽어 있으면 조용히 no-op. 매 호출마다 생존 여부를
    /// 다시 확인하므로 호출자는 미리 확인할 필요가 없다.
    pub async fn send(&self, cmd: &NodeCommand) {
        if !self.is_alive() {
            debug!("Node not alive, dropping command: {}", cmd);
            return;
        }

        debug!("Sending node command: {}", cmd);
        if self.stdin_tx.send(format!("{}\n", cmd)).await.is_err() {
            self.alive.store(false, Ordering::SeqCst);
        }
    }

    /// 프로세스 강제 종료 (리더는 EOF로 풀려난다)
    pub async fn terminate(&self) {
        self.alive.store(false, Ordering::SeqCst);

        let mut child_guard = self.child.lock().await;
        if let Some(mut child) = child_guard.take() {
            let _ = child.kill().await;
        }
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use std::time::Duration;

    /// 가짜 백엔드 스크립트 생성
    fn fake_backend(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("fake_node");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    async fn next_event(rx: &mut mpsc::UnboundedReceiver<NodeEvent>) -> NodeEvent {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for node event")
            .expect("event channel closed")
    }

    #[tokio::test]
    async fn test_missing_binary_is_launch_error() {
        let result = NodeProcess::spawn(
            Path::new("./no/such/dsm_headless"),
            "1",
            Path::new("cluster.txt"),
        );

        match result {
            Err(e) => assert!(e.is_launch()),
            Ok(_) => panic!("expected launch failure"),
        }
    }

    #[tokio::test]
    async fn test_reader_decodes_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let backend = fake_backend(
            &dir,
            "printf 'STATUS|IDLE\\nplain diagnostic\\nCACHE|x|1|HOME\\nCACHE|bad\\n'",
        );

        let (proc_, mut rx) =
            NodeProcess::spawn(&backend, "1", Path::new("cluster.txt")).unwrap();

        // 진단 라인과 malformed CACHE는 이벤트가 되지 않는다
        assert_eq!(
            next_event(&mut rx).await,
            NodeEvent::Message(NodeMessage::Status("IDLE".to_string()))
        );
        assert_eq!(
            next_event(&mut rx).await,
            NodeEvent::Message(NodeMessage::Cache {
                key: "x".to_string(),
                value: "1".to_string(),
                role: "HOME".to_string(),
            })
        );
        assert_eq!(next_event(&mut rx).await, NodeEvent::Closed);

        proc_.terminate().await;
    }

    #[tokio::test]
    async fn test_send_after_exit_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let backend = fake_backend(&dir, "exit 0");

        let (proc_, mut rx) =
            NodeProcess::spawn(&backend, "1", Path::new("cluster.txt")).unwrap();

        assert_eq!(next_event(&mut rx).await, NodeEvent::Closed);
        assert!(!proc_.is_alive());

        // 죽은 프로세스로의 send는 조용한 no-op
        proc_.send(&NodeCommand::get("x")).await;
    }

    #[tokio::test]
    async fn test_command_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        // 받은 명령을 RESULT 이벤트로 되돌려주는 에코 백엔드
        let backend = fake_backend(
            &dir,
            "while read line; do printf 'RESULT|%s\\n' \"$line\"; done",
        );

        let (proc_, mut rx) =
            NodeProcess::spawn(&backend, "1", Path::new("cluster.txt")).unwrap();

        proc_.send(&NodeCommand::put("x", "11")).await;
        assert_eq!(
            next_event(&mut rx).await,
            NodeEvent::Message(NodeMessage::Result("put x 11".to_string()))
        );

        proc_.terminate().await;
        assert_eq!(next_event(&mut rx).await, NodeEvent::Closed);
    }
}
