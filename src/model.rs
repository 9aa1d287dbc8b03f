use serde::{Deserialize, Serialize};
use std::fmt;

/// The `error` value the start endpoint uses when the user already has an attempt.
pub const EXISTS_ERROR: &str = "Exists";

/// Opaque challenge identifier read from a `data-content-id` attribute. Passed through to URLs
/// untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChallengeId(String);

impl ChallengeId {
    /// Returns `None` for a missing or empty attribute, which callers treat as "do nothing".
    pub fn from_attr(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some(value) if !value.is_empty() => Some(Self(value.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StartRequest {}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    pub completed: bool,
}

// Wire shapes. Every field is optional on the wire and only the outcome enums read them.

#[derive(Debug, Default, Deserialize)]
pub struct StartReply {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmitReply {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    completed: Option<bool>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    time_taken: Option<f64>,
    #[serde(default)]
    chapter_points: Option<f64>,
    #[serde(default)]
    bonus_points: Option<f64>,
    #[serde(default)]
    total_points: Option<f64>,
    #[serde(default)]
    revealed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// The user already has an attempt for this challenge. Re-entry is allowed.
    AlreadyStarted,
    Rejected { message: Option<String> },
}

impl From<StartReply> for StartOutcome {
    fn from(reply: StartReply) -> Self {
        if reply.ok {
            return StartOutcome::Started;
        }
        match reply.error {
            Some(e) if e == EXISTS_ERROR => StartOutcome::AlreadyStarted,
            message => StartOutcome::Rejected {
                message: message.filter(|m| !m.is_empty()),
            },
        }
    }
}

impl StartOutcome {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<StartReply>(body).map(Into::into)
    }
}

/// The known fields of an accepted submission. Points are kept exactly as sent, fractions
/// included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitSummary {
    pub completed: Option<bool>,
    pub score: Option<f64>,
    pub time_taken: Option<f64>,
    pub chapter_points: Option<f64>,
    pub bonus_points: Option<f64>,
    pub total_points: Option<f64>,
    pub revealed: bool,
}

impl SubmitSummary {
    /// Chapter points, falling back to `score` when they are absent or zero.
    pub fn base_points(&self) -> f64 {
        self.chapter_points
            .filter(|p| *p != 0.0)
            .or(self.score)
            .unwrap_or(0.0)
    }

    pub fn bonus(&self) -> f64 {
        self.bonus_points.unwrap_or(0.0)
    }

    /// Aggregate points for the nav badge. Falls back to base plus bonus.
    pub fn total(&self) -> f64 {
        self.total_points
            .filter(|p| *p != 0.0)
            .unwrap_or_else(|| self.base_points() + self.bonus())
    }

    /// The server's word on completion wins over what was sent.
    pub fn completed_or(&self, sent: bool) -> bool {
        self.completed.unwrap_or(sent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted(SubmitSummary),
    Rejected { message: Option<String> },
}

impl From<SubmitReply> for SubmitOutcome {
    fn from(reply: SubmitReply) -> Self {
        if !reply.ok {
            return SubmitOutcome::Rejected {
                message: reply.error.filter(|m| !m.is_empty()),
            };
        }
        SubmitOutcome::Accepted(SubmitSummary {
            completed: reply.completed,
            score: reply.score,
            time_taken: reply.time_taken,
            chapter_points: reply.chapter_points,
            bonus_points: reply.bonus_points,
            total_points: reply.total_points,
            revealed: reply.revealed.unwrap_or(false),
        })
    }
}

impl SubmitOutcome {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<SubmitReply>(body).map(Into::into)
    }
}
