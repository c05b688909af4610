use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ClassKind;
use crate::ws::classroom::{ClassError, Snapshot, SubmissionList, SubmissionState};
use crate::ws::codeshare::ProblemData;
use crate::ws::pollshare::PollData;

/// Envelope of every frame a client sends
#[derive(Deserialize, Debug)]
pub struct InboundMessage {
    pub class_id: String,
    #[serde(rename = "type")]
    pub msg_type: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct PasswordData {
    pub password: String,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct SendProblemData {
    pub password: String,
    pub description: String,
    pub code: String,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct SendPollData {
    pub password: String,
    pub poll_question: String,
    pub options: Vec<String>,
}

/// A message type understood by the kind of class it was sent to
#[derive(Debug, PartialEq)]
pub enum ClassRequest {
    Ping,
    Init,
    StudentSubmit(Value),
    StudentSubmitPoll(String),
    TeacherSendProblem(SendProblemData),
    TeacherSendPoll(SendPollData),
    TeacherClearSubmissions(PasswordData),
    TeacherSwitchSubmit(PasswordData),
}

impl ClassRequest {
    /// `Ok(None)` for a type this kind of class does not handle.
    pub fn parse(kind: ClassKind, msg_type: &str, data: Value) -> Result<Option<Self>, serde_json::Error> {
        let request = match (kind, msg_type) {
            (_, "ping") => ClassRequest::Ping,
            (_, "init") => ClassRequest::Init,
            (ClassKind::Codeshare, "studentSubmit" | "student_submit") => {
                ClassRequest::StudentSubmit(data)
            }
            (ClassKind::Pollshare, "studentSubmitPoll" | "student_submit_poll") => {
                ClassRequest::StudentSubmitPoll(serde_json::from_value(data)?)
            }
            (ClassKind::Codeshare, "teacherSendProblem" | "teacher_send_problem") => {
                ClassRequest::TeacherSendProblem(serde_json::from_value(data)?)
            }
            (ClassKind::Pollshare, "teacherSendPoll" | "teacher_send_poll") => {
                ClassRequest::TeacherSendPoll(serde_json::from_value(data)?)
            }
            (_, "teacherClearSubmissions" | "teacher_clear_submissions") => {
                ClassRequest::TeacherClearSubmissions(serde_json::from_value(data)?)
            }
            (_, "teacherSwitchSubmit" | "submission_switch") => {
                ClassRequest::TeacherSwitchSubmit(serde_json::from_value(data)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(request))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PongData {
    pub date: String,
}

/// Body of an `error` packet
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub code: u16,
    pub error: String,
}

impl ErrorBody {
    fn new(code: u16, error: &str) -> Self {
        Self {
            code,
            error: error.to_string(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(404, "Class Code Not Found")
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Unauthorized")
    }

    pub fn malformed() -> Self {
        Self::new(400, "Malformed Message")
    }

    /// The error packet a client sees for `err`, if any.
    pub fn for_class_error(err: &ClassError) -> Option<Self> {
        match err {
            ClassError::ClassNotFound => Some(Self::not_found()),
            ClassError::Unauthorized => Some(Self::unauthorized()),
            ClassError::InvalidOption(_) => Some(Self::new(400, "Invalid Poll Option")),
            ClassError::SubmissionsDisabled => Some(Self::new(403, "Submissions Disabled")),
            ClassError::KindMismatch(_) | ClassError::ClassIdExhausted(_) => None,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum PacketBody {
    #[serde(rename = "pong")]
    Pong(PongData),
    #[serde(rename = "init")]
    Init(Snapshot),
    #[serde(rename = "submissionList")]
    SubmissionList(SubmissionList),
    #[serde(rename = "problem")]
    Problem(ProblemData),
    #[serde(rename = "submissionState")]
    SubmissionState(SubmissionState),
    #[serde(rename = "poll")]
    Poll(PollData),
    #[serde(rename = "error")]
    Error(ErrorBody),
}

/// Every frame the server sends: `{type, data, class_id}`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Packet {
    #[serde(flatten)]
    pub body: PacketBody,
    pub class_id: String,
}

impl Packet {
    pub fn new(class_id: &str, body: PacketBody) -> Self {
        Self {
            body,
            class_id: class_id.to_string(),
        }
    }

    pub fn error(class_id: &str, error: ErrorBody) -> Self {
        Self::new(class_id, PacketBody::Error(error))
    }

    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
