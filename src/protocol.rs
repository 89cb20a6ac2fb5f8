//! JSON-lines protocol between the presentation layer and the host (serde ready).
//! One client message per line on stdin, one server message per line on stdout.

use serde::{Deserialize, Serialize};

use crate::domain::{Answer, Problem, ProblemData, ProblemKind};
use crate::logic::SubmitOutcome;
use crate::progress::{RewardOutcome, UserProgressState};

/// Messages the client can send.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Ping,
    NewProblem {
        /// Parsed separately so unknown kinds surface as `UnsupportedKind`.
        kind: String,
    },
    SubmitAnswer {
        #[serde(rename = "problemId")]
        problem_id: String,
        answer: Answer,
    },
    Hint {
        #[serde(rename = "problemId")]
        problem_id: String,
    },
    Progress,
    /// Player navigated away: drop the problem and cancel any pending advance.
    Leave,
}

/// Messages the host sends back.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Pong,
    Problem {
        problem: ProblemOut,
    },
    AnswerResult {
        correct: bool,
        message: String,
        #[serde(rename = "canonicalAnswer")]
        canonical_answer: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reward: Option<RewardOutcome>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        unlocked: Vec<String>,
        /// A new problem follows after the advance delay.
        advancing: bool,
    },
    Hint {
        text: String,
    },
    Progress {
        level: u32,
        points: u32,
        unlocked: Vec<String>,
    },
    Left,
    Error {
        message: String,
    },
}

/// Problem as shown to the player. Solution forms stay on the host.
#[derive(Debug, Serialize)]
pub struct ProblemOut {
    pub id: String,
    pub kind: ProblemKind,
    pub prompt: String,
    pub data: ProblemData,
    #[serde(rename = "rewardPoints")]
    pub reward_points: u32,
}

pub fn to_out(p: &Problem) -> ProblemOut {
    ProblemOut {
        id: p.id.clone(),
        kind: p.kind,
        prompt: p.prompt.clone(),
        data: p.data.clone(),
        reward_points: p.reward_points,
    }
}

pub fn answer_result(out: SubmitOutcome) -> ServerMessage {
    let advancing = out.advancing();
    ServerMessage::AnswerResult {
        correct: out.verdict.correct,
        message: out.verdict.message,
        canonical_answer: out.verdict.canonical_answer,
        reward: out.reward,
        unlocked: out.unlocked,
        advancing,
    }
}

pub fn progress_out(p: &UserProgressState) -> ServerMessage {
    ServerMessage::Progress {
        level: p.level,
        points: p.points,
        unlocked: p.unlocked_modules.iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_client_messages() {
        let m: ClientMessage = serde_json::from_str(r#"{"type":"new_problem","kind":"arrange_smallest"}"#).unwrap();
        assert!(matches!(m, ClientMessage::NewProblem { kind } if kind == "arrange_smallest"));

        let m: ClientMessage =
            serde_json::from_str(r#"{"type":"submit_answer","problemId":"p1","answer":[500,200,5]}"#).unwrap();
        assert!(matches!(m, ClientMessage::SubmitAnswer { answer: Answer::Denominations(ref d), .. } if d == &vec![500, 200, 5]));

        let m: ClientMessage = serde_json::from_str(r#"{"type":"leave"}"#).unwrap();
        assert!(matches!(m, ClientMessage::Leave));
    }

    #[test]
    fn problem_out_hides_solutions() {
        let out = ServerMessage::Problem {
            problem: ProblemOut {
                id: "p1".into(),
                kind: ProblemKind::CommaGrouping,
                prompt: "Place commas".into(),
                data: ProblemData::Number { value: 1234567 },
                reward_points: 1,
            },
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["type"], "problem");
        assert_eq!(json["problem"]["kind"], "comma_grouping");
        assert_eq!(json["problem"]["data"]["type"], "number");
        assert!(json["problem"].get("solution_forms").is_none());
    }
}
