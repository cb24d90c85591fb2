//! Immutable relay configuration handed to the delivery client at construction

use std::time::Duration;

use serde::Deserialize;

/// Default workflow webhook, used when `N8N_WEBHOOK_URL` is not set
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://n8n-n8n.dwu3jc.easypanel.host/webhook/ec4f9b55-a8da-46ac-b8d5-5df3a4cc6847";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_HEALTH_TIMEOUT_SECONDS: u64 = 5;

/// Utterances sent in place of user speech for requests that carry none
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub start_conversation: String,
    pub end_conversation: String,
    pub unrecognized: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start_conversation: "start_conversation".to_string(),
            end_conversation: "end_conversation".to_string(),
            unrecognized: "unrecognized_message".to_string(),
        }
    }
}

/// Fixed texts spoken by the relay itself
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpeechTexts {
    /// Spoken when the workflow could not be reached or replied with garbage
    pub apology: String,
    pub apology_reprompt: String,
    /// Reprompt attached to envelopes synthesized from plain workflow replies
    pub generic_reprompt: String,
    pub goodbye: String,
    pub help: String,
    pub help_reprompt: String,
}

impl Default for SpeechTexts {
    fn default() -> Self {
        Self {
            apology: "Desculpe, não consegui processar sua solicitação no momento. \
                      Por favor, tente novamente."
                .to_string(),
            apology_reprompt: "Você pode tentar fazer sua pergunta de outra forma?".to_string(),
            generic_reprompt: "Posso ajudar com mais alguma coisa?".to_string(),
            goodbye: "Até logo! Foi ótimo conversar com você. \
                      Volte sempre para praticar mais inglês!"
                .to_string(),
            help: "Você pode me fazer perguntas em inglês, pedir traduções, explicações \
                   gramaticais ou simplesmente conversar para praticar. Por exemplo, diga \
                   'What is the weather like?' ou 'How do you say olá in English?'"
                .to_string(),
            help_reprompt: "O que você gostaria de aprender ou praticar?".to_string(),
        }
    }
}

/// Everything the delivery client needs to talk to the workflow
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub webhook_url: String,
    /// Bound on the relay POST and on custom events
    pub timeout: Duration,
    /// Bound on the health probe
    pub health_timeout: Duration,
    pub markers: Markers,
    pub speech: SpeechTexts,
}

impl RelayConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            health_timeout: Duration::from_secs(DEFAULT_HEALTH_TIMEOUT_SECONDS),
            markers: Markers::default(),
            speech: SpeechTexts::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_config_builder() {
        let config = RelayConfig::new("https://hooks.example.com/skill")
            .with_timeout(Duration::from_secs(20))
            .with_health_timeout(Duration::from_secs(2));

        assert_eq!(config.webhook_url, "https://hooks.example.com/skill");
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.health_timeout, Duration::from_secs(2));
        assert_eq!(config.markers, Markers::default());
    }

    #[test]
    fn test_partial_speech_yaml_keeps_defaults() {
        let speech: SpeechTexts = serde_yaml::from_str("goodbye: \"Tchau!\"").unwrap();

        assert_eq!(speech.goodbye, "Tchau!");
        assert_eq!(speech.apology, SpeechTexts::default().apology);
    }
}
