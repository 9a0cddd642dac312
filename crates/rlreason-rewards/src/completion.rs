//! Candidate completions
//!
//! A completion arrives either as raw text or as a conversational record
//! (a list of turns, as produced by chat-formatted generation). Reward
//! functions only ever look at the text of the first turn.

use serde::{Deserialize, Serialize};

use crate::error::{RewardError, RewardResult};

/// One conversational turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Speaker role, e.g. "assistant"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Turn text
    pub content: String,
}

impl Turn {
    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Some("assistant".to_string()),
            content: content.into(),
        }
    }
}

/// A candidate response to be scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Completion {
    /// Plain generated text
    Text(String),
    /// Structured single-turn record
    Turns(Vec<Turn>),
}

impl Completion {
    /// Extract the textual content of this completion
    ///
    /// Text is returned unchanged; a turn record yields the content of its
    /// first turn. An empty record has no content and is a contract
    /// violation by the producer of the batch.
    pub fn text(&self) -> RewardResult<&str> {
        match self {
            Completion::Text(text) => Ok(text.as_str()),
            Completion::Turns(turns) => turns
                .first()
                .map(|turn| turn.content.as_str())
                .ok_or_else(|| RewardError::malformed("turn record has no turns")),
        }
    }
}

impl From<String> for Completion {
    fn from(text: String) -> Self {
        Completion::Text(text)
    }
}

impl From<&str> for Completion {
    fn from(text: &str) -> Self {
        Completion::Text(text.to_string())
    }
}

impl From<Vec<Turn>> for Completion {
    fn from(turns: Vec<Turn>) -> Self {
        Completion::Turns(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_passthrough() {
        let completion = Completion::from("<think>\nhi\n</think>");
        assert_eq!(completion.text().unwrap(), "<think>\nhi\n</think>");
    }

    #[test]
    fn test_first_turn_content() {
        let completion = Completion::from(vec![
            Turn::assistant("first"),
            Turn::assistant("second"),
        ]);
        assert_eq!(completion.text().unwrap(), "first");
    }

    #[test]
    fn test_empty_record_is_malformed() {
        let completion = Completion::Turns(Vec::new());
        assert!(matches!(
            completion.text(),
            Err(RewardError::MalformedCompletion(_))
        ));
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let text: Completion = serde_json::from_str(r#""plain""#).unwrap();
        assert_eq!(text, Completion::Text("plain".to_string()));

        let turns: Completion =
            serde_json::from_str(r#"[{"role": "assistant", "content": "x", "extra": 1}]"#)
                .unwrap();
        assert_eq!(turns.text().unwrap(), "x");

        assert!(serde_json::from_str::<Completion>("42").is_err());
        assert!(serde_json::from_str::<Completion>(r#"[{"role": "user"}]"#).is_err());
    }
}
