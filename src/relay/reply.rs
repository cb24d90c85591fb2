//! Classification of workflow replies

use serde_json::Value;

use super::config::SpeechTexts;
use super::envelope::OutboundEnvelope;

/// A successful workflow reply
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowReply {
    /// The workflow already built a response envelope; kept as received
    Envelope(Value),
    /// Anything else; spoken text is pulled out of it
    Generic(Value),
}

impl WorkflowReply {
    /// Single shape check: an object carrying both `version` and `response` is an envelope.
    ///
    /// Field types inside are not checked; the envelope is the workflow's to get right.
    pub fn classify(body: Value) -> Self {
        let looks_like_envelope = body.get("version").is_some() && body.get("response").is_some();

        if looks_like_envelope {
            Self::Envelope(body)
        } else {
            Self::Generic(body)
        }
    }

    pub fn into_envelope(self, speech: &SpeechTexts) -> OutboundEnvelope {
        match self {
            Self::Envelope(body) => OutboundEnvelope::passthrough(body),
            Self::Generic(body) => OutboundEnvelope::speak(reply_text(&body))
                .with_reprompt(speech.generic_reprompt.clone()),
        }
    }
}

/// Text to speak for a generic reply: `text`, then `message`, then the body itself.
pub fn reply_text(body: &Value) -> String {
    ["text", "message"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| match body {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_reply_passes_through() {
        let body = json!({
            "version": "1.0",
            "response": {
                "outputSpeech": { "type": "PlainText", "text": "Hello!" },
                "shouldEndSession": false
            }
        });

        let reply = WorkflowReply::classify(body.clone());
        assert!(matches!(reply, WorkflowReply::Envelope(_)));

        let envelope = reply.into_envelope(&SpeechTexts::default());
        assert_eq!(serde_json::to_value(&envelope).unwrap(), body);
    }

    #[test]
    fn test_text_field_is_spoken() {
        let speech = SpeechTexts::default();
        let envelope = WorkflowReply::classify(json!({ "text": "hi" })).into_envelope(&speech);

        assert_eq!(envelope.speech_text(), Some("hi"));
        assert_eq!(envelope.reprompt_text(), Some(speech.generic_reprompt.as_str()));
        assert!(!envelope.should_end_session());
    }

    #[test]
    fn test_message_field_used_when_no_text() {
        assert_eq!(reply_text(&json!({ "message": "tudo certo", "code": 1 })), "tudo certo");
        assert_eq!(reply_text(&json!({ "text": 5, "message": "m" })), "m");
    }

    #[test]
    fn test_other_shapes_are_stringified() {
        assert_eq!(reply_text(&json!("plain string")), "plain string");
        assert_eq!(reply_text(&json!({ "answer": 42 })), r#"{"answer":42}"#);
        assert_eq!(reply_text(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_envelope_with_null_and_mistyped_fields_is_untouched() {
        let body = json!({
            "version": "1.0",
            "response": {
                "outputSpeech": { "type": "PlainText", "text": "Oi" },
                "reprompt": null,
                "shouldEndSession": "false"
            }
        });

        let envelope = WorkflowReply::classify(body.clone()).into_envelope(&SpeechTexts::default());

        assert!(envelope.is_passthrough());
        assert_eq!(envelope.speech_text(), Some("Oi"));
        assert_eq!(serde_json::to_value(&envelope).unwrap(), body);
    }

    #[test]
    fn test_partial_envelope_is_generic() {
        assert!(matches!(
            WorkflowReply::classify(json!({ "version": "1.0", "text": "x" })),
            WorkflowReply::Generic(_)
        ));
        assert!(matches!(
            WorkflowReply::classify(json!({ "response": { "text": "x" } })),
            WorkflowReply::Generic(_)
        ));
        assert!(matches!(
            WorkflowReply::classify(json!(["version", "response"])),
            WorkflowReply::Generic(_)
        ));
    }
}
