use serde::{Deserialize, Serialize};

// ─── Session enumerations ─────────────────────────────────────────────────────

/// Subject area the tutor is asked to stay within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    #[default]
    Algebra,
    Geometry,
    Calculus,
}

impl Topic {
    /// Advance to the next topic (wraps around).  Used by the TUI topic key.
    pub fn cycle(self) -> Self {
        match self {
            Topic::Algebra => Topic::Geometry,
            Topic::Geometry => Topic::Calculus,
            Topic::Calculus => Topic::Algebra,
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Topic::Algebra => "algebra",
            Topic::Geometry => "geometry",
            Topic::Calculus => "calculus",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Topic {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "algebra" => Ok(Topic::Algebra),
            "geometry" => Ok(Topic::Geometry),
            "calculus" => Ok(Topic::Calculus),
            other => Err(format!(
                "unknown topic {other:?} (expected algebra | geometry | calculus)"
            )),
        }
    }
}

/// Problem difficulty requested from the tutor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Advance to the next level (wraps around).  Used by the TUI level key.
    pub fn cycle(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty {other:?} (expected easy | medium | hard)"
            )),
        }
    }
}

// ─── Wire types ───────────────────────────────────────────────────────────────

/// Who authored a conversational turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One `{role, content}` pair in the history sent with every request.
///
/// History deliberately carries no step detail: steps are a display-only
/// augmentation, not part of the conversational record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// Request body for one tutoring turn (`POST /api/chat`).
#[derive(Debug, Clone, Serialize)]
pub struct TurnRequest {
    pub message: String,
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub history: Vec<ChatMessage>,
}

/// One step of a worked solution.  `index` is 1-based when the service
/// provides it; renderers fall back to list position otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub index: Option<u32>,
    pub text: String,
}

impl Step {
    pub fn new(index: u32, text: impl Into<String>) -> Self {
        Self { index: Some(index), text: text.into() }
    }
}

/// Reply payload from the tutoring service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnReply {
    pub reply: String,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub final_answer: Option<String>,
    #[serde(default)]
    pub correctness: Option<bool>,
}

impl TurnReply {
    pub fn text(reply: impl Into<String>) -> Self {
        Self { reply: reply.into(), ..Default::default() }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
