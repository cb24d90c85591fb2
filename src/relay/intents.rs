//! Intent routing table
//!
//! Platform built-in intents such as stop or help are answered locally; every
//! other request goes to the workflow. The table is seeded from
//! [`SpeechTexts`] and can be extended or overridden from YAML:
//!
//! ```yaml
//! intents:
//!   AMAZON.FallbackIntent:
//!     action: reply
//!     text: "Não entendi. Pode repetir?"
//!     reprompt: "Pode repetir?"
//!   AMAZON.HelpIntent:
//!     action: forward
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use super::config::SpeechTexts;
use super::envelope::{InboundEnvelope, OutboundEnvelope, RequestKind};

pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";

/// What to do with a named intent
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum IntentAction {
    /// Send to the workflow like any other utterance
    Forward,
    /// Answer locally and keep the session open
    Reply {
        text: String,
        #[serde(default)]
        reprompt: Option<String>,
    },
    /// Answer locally and close the session
    EndSession { text: String },
}

impl IntentAction {
    fn respond(&self) -> Option<OutboundEnvelope> {
        match self {
            Self::Forward => None,
            Self::Reply { text, reprompt } => {
                let envelope = OutboundEnvelope::speak(text.clone());
                Some(match reprompt {
                    Some(reprompt) => envelope.with_reprompt(reprompt.clone()),
                    None => envelope,
                })
            }
            Self::EndSession { text } => {
                Some(OutboundEnvelope::speak(text.clone()).ending_session(true))
            }
        }
    }
}

/// Routing decision for one inbound request
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Forward,
    Respond(OutboundEnvelope),
}

#[derive(Debug, Clone)]
pub struct IntentRouter {
    table: HashMap<String, IntentAction>,
}

impl IntentRouter {
    /// Router with the built-in stop/cancel/help answers
    pub fn new(speech: &SpeechTexts) -> Self {
        let goodbye = IntentAction::EndSession {
            text: speech.goodbye.clone(),
        };
        let mut table = HashMap::new();
        table.insert(STOP_INTENT.to_string(), goodbye.clone());
        table.insert(CANCEL_INTENT.to_string(), goodbye);
        table.insert(
            HELP_INTENT.to_string(),
            IntentAction::Reply {
                text: speech.help.clone(),
                reprompt: Some(speech.help_reprompt.clone()),
            },
        );
        Self { table }
    }

    /// Router that forwards everything
    pub fn forward_all() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: HashMap<String, IntentAction>) -> Self {
        self.table.extend(overrides);
        self
    }

    pub fn action_for(&self, intent_name: &str) -> Option<&IntentAction> {
        self.table.get(intent_name)
    }

    pub fn route(&self, envelope: &InboundEnvelope) -> Route {
        if envelope.kind != RequestKind::Intent {
            return Route::Forward;
        }

        let Some(name) = envelope.intent_name.as_deref() else {
            return Route::Forward;
        };

        match self.action_for(name).and_then(IntentAction::respond) {
            Some(envelope) => {
                debug!(intent = %name, "Answering intent locally");
                Route::Respond(envelope)
            }
            None => Route::Forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn intent(name: &str) -> InboundEnvelope {
        InboundEnvelope::from_value(json!({
            "request": { "type": "IntentRequest", "intent": { "name": name } }
        }))
    }

    #[test]
    fn test_stop_and_cancel_end_session() {
        let speech = SpeechTexts::default();
        let router = IntentRouter::new(&speech);

        for name in [STOP_INTENT, CANCEL_INTENT] {
            let Route::Respond(envelope) = router.route(&intent(name)) else {
                panic!("{name} should be answered locally");
            };
            assert!(envelope.should_end_session());
            assert_eq!(envelope.speech_text(), Some(speech.goodbye.as_str()));
        }
    }

    #[test]
    fn test_help_keeps_session_open() {
        let speech = SpeechTexts::default();
        let router = IntentRouter::new(&speech);

        let Route::Respond(envelope) = router.route(&intent(HELP_INTENT)) else {
            panic!("help should be answered locally");
        };
        assert!(!envelope.should_end_session());
        assert_eq!(envelope.speech_text(), Some(speech.help.as_str()));
        assert_eq!(envelope.reprompt_text(), Some(speech.help_reprompt.as_str()));
    }

    #[test]
    fn test_other_requests_forward() {
        let router = IntentRouter::new(&SpeechTexts::default());

        assert_eq!(router.route(&intent("UserInputIntent")), Route::Forward);

        let launch = InboundEnvelope::from_value(json!({
            "request": { "type": "LaunchRequest" }
        }));
        assert_eq!(router.route(&launch), Route::Forward);

        // Only intent requests consult the table
        let ended = InboundEnvelope::from_value(json!({
            "request": { "type": "SessionEndedRequest", "intent": { "name": STOP_INTENT } }
        }));
        assert_eq!(router.route(&ended), Route::Forward);
    }

    #[test]
    fn test_yaml_overrides() {
        let overrides: HashMap<String, IntentAction> = serde_yaml::from_str(
            r#"
AMAZON.HelpIntent:
  action: forward
AMAZON.FallbackIntent:
  action: reply
  text: "Não entendi."
"#,
        )
        .unwrap();

        let router = IntentRouter::new(&SpeechTexts::default()).with_overrides(overrides);

        assert_eq!(router.route(&intent(HELP_INTENT)), Route::Forward);
        assert_eq!(
            router.route(&intent("AMAZON.FallbackIntent")),
            Route::Respond(OutboundEnvelope::speak("Não entendi."))
        );
        assert!(matches!(
            router.action_for(STOP_INTENT),
            Some(IntentAction::EndSession { .. })
        ));
    }

    #[test]
    fn test_forward_all() {
        let router = IntentRouter::forward_all();
        assert_eq!(router.route(&intent(STOP_INTENT)), Route::Forward);
    }
}
