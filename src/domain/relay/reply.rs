//! Shapes the external API may answer with.
//!
//! The upstream service is loosely specified; a reply is classified once into
//! [`UpstreamReply`] and every consumer matches on the variants.

use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;

/// Message surfaced when an error-flagged reply carries no answer.
pub const DEFAULT_UPSTREAM_ERROR: &str = "Failed to get response from AI service";

/// Text returned when a successful reply has no recognizable content.
pub const UNEXTRACTABLE_REPLY: &str = "Received response but couldn't extract text content.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamReply {
    /// `{type: "error", answer}`.
    Error { message: String },
    /// `{choices: [{message: {content}}]}`.
    ChatCompletion { content: String },
    /// `{text}`.
    Text(String),
    /// `{answer}`.
    Answer(String),
    /// Anything else.
    Unrecognized,
}

impl UpstreamReply {
    /// Classifies a decoded JSON body. Precedence: error flag, chat
    /// completion, `text`, `answer`.
    pub fn classify(body: &Value) -> Self {
        ReplyBody::deserialize(body)
            .map(Self::from)
            .unwrap_or(Self::Unrecognized)
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Error { .. } => "error",
            Self::ChatCompletion { .. } => "chat_completion",
            Self::Text(_) => "text",
            Self::Answer(_) => "answer",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl From<ReplyBody> for UpstreamReply {
    fn from(body: ReplyBody) -> Self {
        let first_message = body
            .choices
            .into_option()
            .and_then(|choices| choices.into_iter().next())
            .and_then(Lenient::into_option)
            .and_then(|choice| choice.message.into_option());

        match (
            body.kind.into_option().as_deref(),
            first_message,
            non_empty(body.text),
            non_empty(body.answer),
        ) {
            (Some("error"), _, _, answer) => Self::Error {
                message: answer.unwrap_or_else(|| DEFAULT_UPSTREAM_ERROR.to_string()),
            },
            (_, Some(message), _, _) => Self::ChatCompletion {
                content: message.content.into_option().unwrap_or_default(),
            },
            (_, None, Some(text), _) => Self::Text(text),
            (_, None, None, Some(answer)) => Self::Answer(answer),
            (_, None, None, None) => Self::Unrecognized,
        }
    }
}

// =============================================================================
// Wire shapes
// =============================================================================

/// Every field the upstream may send. None of them is required.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReplyBody {
    #[serde(rename = "type")]
    kind: Lenient<String>,
    answer: Lenient<String>,
    text: Lenient<String>,
    choices: Lenient<Vec<Lenient<Choice>>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Lenient<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Lenient<String>,
}

/// A field of the wrong type counts as absent instead of failing the body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Expected(T),
    Other(IgnoredAny),
}

impl<T> Lenient<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Self::Expected(value) => Some(value),
            Self::Other(_) => None,
        }
    }
}

impl<T> Default for Lenient<T> {
    fn default() -> Self {
        Self::Other(IgnoredAny)
    }
}

fn non_empty(field: Lenient<String>) -> Option<String> {
    field.into_option().filter(|s| !s.is_empty())
}
