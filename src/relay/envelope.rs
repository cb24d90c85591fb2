//! Voice-assistant request and response envelopes
//!
//! [`InboundEnvelope`] is read leniently out of whatever JSON the platform sent:
//! missing or mistyped fields become `None` and an unrecognised request type
//! becomes [`RequestKind::Unknown`]. Construction never fails.
//!
//! [`OutboundEnvelope`] is either a plain-text envelope built here or a
//! ready-made envelope from the workflow, which is returned byte-for-byte.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Response envelope protocol version
pub const ENVELOPE_VERSION: &str = "1.0";

const PLAIN_TEXT: &str = "PlainText";

/// Kind of an inbound skill request, taken from `request.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// The user opened the skill
    Launch,
    /// The user said something that matched an intent
    Intent,
    /// The platform closed the session
    SessionEnded,
    /// Missing or unrecognised request type
    Unknown,
}

impl RequestKind {
    pub fn from_type(request_type: &str) -> Self {
        match request_type {
            "LaunchRequest" => Self::Launch,
            "IntentRequest" => Self::Intent,
            "SessionEndedRequest" => Self::SessionEnded,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Launch => "LaunchRequest",
            Self::Intent => "IntentRequest",
            Self::SessionEnded => "SessionEndedRequest",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured view of an inbound voice-assistant request
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEnvelope {
    pub kind: RequestKind,
    pub intent_name: Option<String>,
    /// Slot name to captured value. Slots the platform sent without a value map to `None`.
    pub slots: BTreeMap<String, Option<String>>,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub locale: Option<String>,
    raw: Value,
}

impl InboundEnvelope {
    /// Build an envelope from the raw request JSON.
    pub fn from_value(raw: Value) -> Self {
        let kind = str_at(&raw, "/request/type")
            .map(RequestKind::from_type)
            .unwrap_or(RequestKind::Unknown);

        let slots = raw
            .pointer("/request/intent/slots")
            .and_then(Value::as_object)
            .map(|slots| {
                slots
                    .iter()
                    .map(|(name, slot)| {
                        let value = slot
                            .get("value")
                            .and_then(Value::as_str)
                            .map(str::to_string);
                        (name.clone(), value)
                    })
                    .collect()
            })
            .unwrap_or_default();

        // Older requests only carry the user under context.System
        let user_id = str_at(&raw, "/session/user/userId")
            .or_else(|| str_at(&raw, "/context/System/user/userId"))
            .map(str::to_string);

        Self {
            kind,
            intent_name: str_at(&raw, "/request/intent/name").map(str::to_string),
            slots,
            session_id: str_at(&raw, "/session/sessionId").map(str::to_string),
            user_id,
            locale: str_at(&raw, "/request/locale").map(str::to_string),
            raw,
        }
    }

    /// Parse raw bytes; a body that is not JSON yields an `Unknown` envelope.
    pub fn from_slice(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(raw) => Self::from_value(raw),
            Err(e) => {
                tracing::warn!(error = %e, "Inbound request body is not valid JSON");
                Self::from_value(Value::Null)
            }
        }
    }

    /// The JSON this envelope was read from
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Value of a slot, if the slot was sent with one
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|v| v.as_deref())
    }
}

fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

/// Response envelope returned to the platform
///
/// Envelopes the relay builds itself are typed. An envelope the workflow
/// already produced is kept as the JSON it arrived as and serialized verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutboundEnvelope {
    Speech(SpeechEnvelope),
    Passthrough(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechEnvelope {
    pub version: String,
    pub response: SkillResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    pub output_speech: OutputSpeech,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl OutputSpeech {
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self {
            kind: PLAIN_TEXT.to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl OutboundEnvelope {
    /// Envelope that speaks `text` and keeps the session open
    pub fn speak(text: impl Into<String>) -> Self {
        Self::Speech(SpeechEnvelope {
            version: ENVELOPE_VERSION.to_string(),
            response: SkillResponse {
                output_speech: OutputSpeech::plain_text(text),
                reprompt: None,
                should_end_session: false,
            },
        })
    }

    /// Workflow-built envelope, served exactly as received
    pub fn passthrough(body: Value) -> Self {
        Self::Passthrough(body)
    }

    /// Sets the reprompt. Pass-through envelopes are left untouched.
    pub fn with_reprompt(mut self, text: impl Into<String>) -> Self {
        if let Self::Speech(envelope) = &mut self {
            envelope.response.reprompt = Some(Reprompt {
                output_speech: OutputSpeech::plain_text(text),
            });
        }
        self
    }

    /// Sets the end-session flag. Pass-through envelopes are left untouched.
    pub fn ending_session(mut self, end: bool) -> Self {
        if let Self::Speech(envelope) = &mut self {
            envelope.response.should_end_session = end;
        }
        self
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough(_))
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Speech(envelope) => Some(&envelope.version),
            Self::Passthrough(body) => str_at(body, "/version"),
        }
    }

    /// Spoken text, if the envelope carries plain text speech
    pub fn speech_text(&self) -> Option<&str> {
        match self {
            Self::Speech(envelope) => Some(&envelope.response.output_speech.text),
            Self::Passthrough(body) => str_at(body, "/response/outputSpeech/text"),
        }
    }

    pub fn reprompt_text(&self) -> Option<&str> {
        match self {
            Self::Speech(envelope) => envelope
                .response
                .reprompt
                .as_ref()
                .map(|r| r.output_speech.text.as_str()),
            Self::Passthrough(body) => str_at(body, "/response/reprompt/outputSpeech/text"),
        }
    }

    /// Whether the session closes after this response. Absent or non-boolean means open.
    pub fn should_end_session(&self) -> bool {
        match self {
            Self::Speech(envelope) => envelope.response.should_end_session,
            Self::Passthrough(body) => body
                .pointer("/response/shouldEndSession")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn intent_request() -> Value {
        json!({
            "version": "1.0",
            "session": {
                "new": false,
                "sessionId": "amzn1.echo-api.session.test-session-id",
                "user": { "userId": "amzn1.ask.account.test-user-id" }
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.test-request-id",
                "locale": "pt-BR",
                "intent": {
                    "name": "UserInputIntent",
                    "slots": {
                        "userText": { "name": "userText", "value": "Olá, como você está?" },
                        "empty": { "name": "empty" }
                    }
                }
            }
        })
    }

    #[test]
    fn test_from_value_reads_intent_request() {
        let envelope = InboundEnvelope::from_value(intent_request());

        assert_eq!(envelope.kind, RequestKind::Intent);
        assert_eq!(envelope.intent_name.as_deref(), Some("UserInputIntent"));
        assert_eq!(envelope.slot_value("userText"), Some("Olá, como você está?"));
        assert_eq!(envelope.slots.get("empty"), Some(&None));
        assert_eq!(
            envelope.session_id.as_deref(),
            Some("amzn1.echo-api.session.test-session-id")
        );
        assert_eq!(
            envelope.user_id.as_deref(),
            Some("amzn1.ask.account.test-user-id")
        );
        assert_eq!(envelope.locale.as_deref(), Some("pt-BR"));
        assert_eq!(envelope.raw(), &intent_request());
    }

    #[test]
    fn test_from_value_tolerates_mistyped_fields() {
        let envelope = InboundEnvelope::from_value(json!({
            "session": { "sessionId": 42 },
            "request": { "type": ["IntentRequest"], "intent": "oops" }
        }));

        assert_eq!(envelope.kind, RequestKind::Unknown);
        assert!(envelope.intent_name.is_none());
        assert!(envelope.slots.is_empty());
        assert!(envelope.session_id.is_none());
    }

    #[test]
    fn test_user_id_falls_back_to_context() {
        let envelope = InboundEnvelope::from_value(json!({
            "context": { "System": { "user": { "userId": "ctx-user" } } },
            "request": { "type": "LaunchRequest" }
        }));

        assert_eq!(envelope.kind, RequestKind::Launch);
        assert_eq!(envelope.user_id.as_deref(), Some("ctx-user"));
    }

    #[test]
    fn test_from_slice_invalid_json_is_unknown() {
        let envelope = InboundEnvelope::from_slice(b"not json");
        assert_eq!(envelope.kind, RequestKind::Unknown);
        assert_eq!(envelope.raw(), &Value::Null);
    }

    #[test]
    fn test_speak_serializes_platform_shape() {
        let envelope = OutboundEnvelope::speak("hi").with_reprompt("still there?");

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "version": "1.0",
                "response": {
                    "outputSpeech": { "type": "PlainText", "text": "hi" },
                    "reprompt": {
                        "outputSpeech": { "type": "PlainText", "text": "still there?" }
                    },
                    "shouldEndSession": false
                }
            })
        );
    }

    #[test]
    fn test_passthrough_serializes_verbatim() {
        let original = json!({
            "version": "1.0",
            "sessionAttributes": { "turn": 3 },
            "response": {
                "outputSpeech": { "type": "SSML", "ssml": "<speak>oi</speak>" },
                "card": { "type": "Simple", "title": "t", "content": "c" },
                "reprompt": null,
                "shouldEndSession": true
            }
        });

        let envelope = OutboundEnvelope::passthrough(original.clone());
        assert!(envelope.is_passthrough());
        assert!(envelope.should_end_session());
        assert!(envelope.speech_text().is_none());
        assert_eq!(envelope.version(), Some("1.0"));
        assert_eq!(serde_json::to_value(&envelope).unwrap(), original);
    }

    #[test]
    fn test_passthrough_ignores_builder_calls() {
        let original = json!({ "version": "1.0", "response": { "shouldEndSession": "false" } });

        let envelope = OutboundEnvelope::passthrough(original.clone())
            .with_reprompt("ignored")
            .ending_session(true);

        assert!(!envelope.should_end_session());
        assert!(envelope.reprompt_text().is_none());
        assert_eq!(serde_json::to_value(&envelope).unwrap(), original);
    }
}
