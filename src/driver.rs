//! JSON-lines message loop. Each client line is parsed and forwarded to core
//! logic; we reply with a single JSON line per request. After a correct answer
//! an advance timer presents the next problem; `leave` or a new request
//! cancels it.

use std::time::Duration;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::domain::ProblemKind;
use crate::logic::{hint_text, leave, new_problem, progress_snapshot, submit_answer};
use crate::protocol::{answer_result, progress_out, to_out, ClientMessage, ServerMessage};
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
  Advance { kind: ProblemKind, epoch: u64 },
}

/// Owns the single pending advance timer. Events from a cancelled or replaced
/// timer carry a stale epoch and are ignored.
pub struct Advancer {
  tx: UnboundedSender<HostEvent>,
  delay: Duration,
  epoch: u64,
  pending: Option<JoinHandle<()>>,
}

impl Advancer {
  pub fn new(delay: Duration) -> (Self, UnboundedReceiver<HostEvent>) {
    let (tx, rx) = unbounded_channel();
    (Self { tx, delay, epoch: 0, pending: None }, rx)
  }

  pub fn schedule(&mut self, kind: ProblemKind) {
    self.cancel();
    let tx = self.tx.clone();
    let delay = self.delay;
    let epoch = self.epoch;
    self.pending = Some(tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      let _ = tx.send(HostEvent::Advance { kind, epoch });
    }));
    debug!(target: "numsense", %kind, epoch, delay_ms = delay.as_millis() as u64, "Advance scheduled");
  }

  pub fn cancel(&mut self) {
    if let Some(handle) = self.pending.take() {
      handle.abort();
      debug!(target: "numsense", epoch = self.epoch, "Advance cancelled");
    }
    self.epoch += 1;
  }

  /// Accept an event only if it belongs to the live timer.
  pub fn accept(&mut self, event: &HostEvent) -> bool {
    let HostEvent::Advance { epoch, .. } = event;
    if *epoch == self.epoch && self.pending.is_some() {
      self.pending = None;
      self.epoch += 1;
      true
    } else {
      false
    }
  }
}

impl Drop for Advancer {
  fn drop(&mut self) {
    if let Some(handle) = self.pending.take() {
      handle.abort();
    }
  }
}

#[instrument(level = "info", skip_all)]
pub async fn run<R, W>(state: &mut GameState, input: R, mut output: W) -> std::io::Result<()>
where
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  info!(target: "numsense", "Session started");
  let (mut advancer, mut events) = Advancer::new(Duration::from_millis(state.config.advance_delay_ms));
  let mut lines = input.lines();

  loop {
    tokio::select! {
      line = lines.next_line() => {
        let Some(line) = line? else { break };
        if line.trim().is_empty() {
          continue;
        }
        let reply = match serde_json::from_str::<ClientMessage>(&line) {
          Ok(incoming) => {
            debug!(target: "numsense", "Received: {:?}", &incoming);
            handle_client(incoming, state, &mut advancer)
          }
          Err(e) => ServerMessage::Error { message: format!("Invalid JSON: {}", e) },
        };
        send(&mut output, &reply).await?;
      }
      Some(event) = events.recv() => {
        if !advancer.accept(&event) {
          debug!(target: "numsense", ?event, "Stale advance ignored");
          continue;
        }
        let HostEvent::Advance { kind, .. } = event;
        let reply = match new_problem(state, kind) {
          Ok(p) => ServerMessage::Problem { problem: to_out(&p) },
          Err(e) => ServerMessage::Error { message: e.to_string() },
        };
        send(&mut output, &reply).await?;
      }
    }
  }

  info!(target: "numsense", "Session ended");
  Ok(())
}

async fn send<W: AsyncWrite + Unpin, T: Serialize>(output: &mut W, msg: &T) -> std::io::Result<()> {
  let mut out = serde_json::to_string(msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  });
  out.push('\n');
  if let Err(e) = output.write_all(out.as_bytes()).await {
    error!(target: "numsense", error = %e, "Write error");
    return Err(e);
  }
  output.flush().await
}

fn handle_client(msg: ClientMessage, state: &mut GameState, advancer: &mut Advancer) -> ServerMessage {
  match msg {
    ClientMessage::Ping => ServerMessage::Pong,

    ClientMessage::NewProblem { kind } => {
      advancer.cancel();
      match kind.parse::<ProblemKind>().and_then(|k| new_problem(state, k)) {
        Ok(p) => ServerMessage::Problem { problem: to_out(&p) },
        Err(e) => {
          error!(target: "numsense", %kind, error = %e, "new_problem failed");
          ServerMessage::Error { message: e.to_string() }
        }
      }
    }

    ClientMessage::SubmitAnswer { problem_id, answer } => match submit_answer(state, &problem_id, &answer) {
      Ok(out) => {
        if out.advancing() {
          if let Some(s) = &state.current {
            advancer.schedule(s.problem().kind);
          }
        }
        answer_result(out)
      }
      Err(e) => ServerMessage::Error { message: e.to_string() },
    },

    ClientMessage::Hint { problem_id } => ServerMessage::Hint { text: hint_text(state, &problem_id) },

    ClientMessage::Progress => progress_out(&progress_snapshot(state)),

    ClientMessage::Leave => {
      advancer.cancel();
      leave(state);
      ServerMessage::Left
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::GameConfig;
  use crate::numfmt::group_indian;
  use serde_json::Value;
  use tokio::io::{BufReader, Lines};

  async fn next_json<R: AsyncBufRead + Unpin>(lines: &mut Lines<R>) -> Value {
    let line = lines.next_line().await.unwrap().expect("reply line");
    serde_json::from_str(&line).unwrap()
  }

  fn state(delay_ms: u64) -> GameState {
    GameState::new(GameConfig { seed: Some(5), advance_delay_ms: delay_ms, ..GameConfig::default() }).unwrap()
  }

  #[tokio::test]
  async fn scheduled_advance_fires_once() {
    let (mut adv, mut rx) = Advancer::new(Duration::from_millis(10));
    adv.schedule(ProblemKind::TableSum);
    let ev = rx.recv().await.unwrap();
    assert!(adv.accept(&ev));
    assert!(!adv.accept(&ev));
  }

  #[tokio::test]
  async fn cancelled_advance_never_arrives() {
    let (mut adv, mut rx) = Advancer::new(Duration::from_millis(10));
    adv.schedule(ProblemKind::TableSum);
    adv.cancel();
    let got = tokio::time::timeout(Duration::from_millis(60), rx.recv()).await;
    assert!(got.is_err(), "cancelled timer delivered {got:?}");
  }

  #[tokio::test]
  async fn rescheduling_invalidates_the_old_timer() {
    let (mut adv, mut rx) = Advancer::new(Duration::from_millis(5));
    adv.schedule(ProblemKind::TableSum);
    adv.schedule(ProblemKind::TableMin);
    let ev = rx.recv().await.unwrap();
    assert!(matches!(ev, HostEvent::Advance { kind: ProblemKind::TableMin, .. }));
    assert!(adv.accept(&ev));
  }

  #[tokio::test]
  async fn scripted_session_replies_line_per_request() {
    let mut st = state(1500);
    let input = concat!(
      "{\"type\":\"ping\"}\n",
      "\n",
      "not json\n",
      "{\"type\":\"new_problem\",\"kind\":\"cheque_writing\"}\n",
      "{\"type\":\"progress\"}\n",
      "{\"type\":\"leave\"}\n",
    );
    let mut out: Vec<u8> = Vec::new();
    run(&mut st, BufReader::new(input.as_bytes()), &mut out).await.unwrap();

    let replies: Vec<Value> = String::from_utf8(out)
      .unwrap()
      .lines()
      .map(|l| serde_json::from_str(l).unwrap())
      .collect();
    assert_eq!(replies.len(), 5);
    assert_eq!(replies[0]["type"], "pong");
    assert_eq!(replies[1]["type"], "error");
    assert!(replies[2]["message"].as_str().unwrap().contains("unsupported problem kind"));
    assert_eq!(replies[3]["type"], "progress");
    assert_eq!(replies[3]["level"], 1);
    assert_eq!(replies[4]["type"], "left");
  }

  #[tokio::test]
  async fn correct_answer_auto_advances() {
    let mut st = state(10);
    let (client, server) = tokio::io::duplex(16 * 1024);
    let (server_read, server_write) = tokio::io::split(server);
    let (client_read, mut client_write) = tokio::io::split(client);

    let driver = run(&mut st, BufReader::new(server_read), server_write);
    let script = async move {
      let mut replies = BufReader::new(client_read).lines();
      client_write
        .write_all(b"{\"type\":\"new_problem\",\"kind\":\"comma_grouping\"}\n")
        .await
        .unwrap();
      let first = next_json(&mut replies).await;
      assert_eq!(first["type"], "problem");
      let id = first["problem"]["id"].as_str().unwrap().to_string();
      let value = first["problem"]["data"]["value"].as_i64().unwrap();
      let answer = group_indian(value).unwrap();
      let line = format!("{{\"type\":\"submit_answer\",\"problemId\":\"{id}\",\"answer\":\"{answer}\"}}\n");
      client_write.write_all(line.as_bytes()).await.unwrap();

      let result = next_json(&mut replies).await;
      assert_eq!(result["type"], "answer_result");
      assert_eq!(result["correct"], true);
      assert_eq!(result["advancing"], true);
      assert_eq!(result["reward"]["points"], 1);

      let advanced = next_json(&mut replies).await;
      assert_eq!(advanced["type"], "problem");
      assert_eq!(advanced["problem"]["kind"], "comma_grouping");
      assert_ne!(advanced["problem"]["id"].as_str().unwrap(), id);
      client_write.shutdown().await.unwrap();
    };
    let (res, ()) = tokio::join!(driver, script);
    res.unwrap();
  }
}
