//! Turns a free-text voice transcript into a structured intent.
//!
//! The interpreter only consumes the transcript string; speech-to-text and
//! rendering live outside the crate. Parsing is deterministic keyword
//! matching, first rule wins.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::ledger::{TransactionDraft, TransactionKind};

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid amount pattern"));

const INCOME_KEYWORDS: [&str; 3] = ["income", "salary", "earning"];

/// Category keywords in match priority order; the first hit wins.
const CATEGORY_KEYWORDS: [&str; 8] = [
    "food",
    "shopping",
    "transport",
    "bills",
    "entertainment",
    "health",
    "education",
    "salary",
];

const FALLBACK_CATEGORY: &str = "Other";

/// Structured action produced from one transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceIntent {
    ShowBalance,
    ShowCharts,
    ShowInsights,
    Add(TransactionDraft),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Could not understand amount. Try: \"add 500 food expense\"")]
    NoAmount,
    #[error("Voice recognition error: {0}")]
    Recognition(String),
}

/// Parses a transcript into an intent. Matching is case-insensitive
/// substring matching over the whole command.
pub fn parse_command(transcript: &str, today: NaiveDate) -> Result<VoiceIntent, VoiceError> {
    let command = transcript.to_lowercase();

    if command.contains("show balance") {
        return Ok(VoiceIntent::ShowBalance);
    }
    if command.contains("show chart") {
        return Ok(VoiceIntent::ShowCharts);
    }
    if command.contains("show insight") {
        return Ok(VoiceIntent::ShowInsights);
    }

    let amount: f64 = AMOUNT_RE
        .find(&command)
        .ok_or(VoiceError::NoAmount)?
        .as_str()
        .parse()
        .map_err(|_| VoiceError::NoAmount)?;

    let kind = if INCOME_KEYWORDS.iter().any(|k| command.contains(k)) {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    };

    let category = CATEGORY_KEYWORDS
        .iter()
        .find(|k| command.contains(*k))
        .map(|k| capitalize(k))
        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

    let description = format!("Voice: {} {}", category, kind);
    let draft = TransactionDraft::new(description, amount, category, kind).on(today);
    Ok(VoiceIntent::Add(draft))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Tracks the single in-flight listening session.
///
/// At most one session may be active; starting a second one is refused.
/// Stopping a session, for any reason, resets the flag without committing
/// anything from an incomplete command.
#[derive(Debug, Default)]
pub struct VoiceSession {
    listening: bool,
}

impl VoiceSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Begins a listening session. Returns false when one is already active.
    pub fn start(&mut self) -> bool {
        if self.listening {
            return false;
        }
        self.listening = true;
        true
    }

    /// Consumes the completed transcript, ending the session.
    pub fn finish(
        &mut self,
        transcript: &str,
        today: NaiveDate,
    ) -> Result<VoiceIntent, VoiceError> {
        self.listening = false;
        parse_command(transcript, today)
    }

    /// Ends the session on a transcription provider failure.
    pub fn fail(&mut self, reason: impl Into<String>) -> VoiceError {
        self.listening = false;
        let error = VoiceError::Recognition(reason.into());
        tracing::warn!(%error, "voice session ended with provider error");
        error
    }

    /// Ends the session without processing anything.
    pub fn cancel(&mut self) {
        self.listening = false;
    }
}
