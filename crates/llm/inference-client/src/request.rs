//! Request payload for the inference endpoint.
//!
//! Everything except the prompt and the three per-call ids is a fixed generation setting.

use prompt::{with_user_message, ChatMessage};
use serde::Serialize;
use uuid::Uuid;

use crate::config::InferenceConfig;

const TEMPERATURE: f64 = 0.3;
const TOP_P: f64 = 1.0;
const TTS_VOICE_ID: &str = "af_sky";
const CLIENT_PROCESSING_TIME: u32 = 11;

/// Per-call random identifiers (128-bit each); regenerated for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIds {
    pub request_id: String,
    pub message_id: String,
    pub user_id: String,
}

impl RequestIds {
    pub fn generate() -> Self {
        Self {
            request_id: format!("req_{}", Uuid::new_v4().simple()),
            message_id: format!("msg_{}", Uuid::new_v4().simple()),
            user_id: format!("user_anon_{}", Uuid::new_v4().simple()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToSpeech {
    pub voice_id: String,
    pub speed: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceRequest {
    pub request_id: String,
    pub conversation_type: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub model_id: String,
    pub model_name: String,
    pub model_type: String,
    pub prompt: Vec<ChatMessage>,
    pub system_prompt: String,
    pub message_id: String,
    pub include_venice_system_prompt: bool,
    pub is_character: bool,
    pub user_id: String,
    pub simple_mode: bool,
    pub character_id: String,
    pub id: String,
    pub text_to_speech: TextToSpeech,
    pub web_enabled: bool,
    pub reasoning: bool,
    pub temperature: f64,
    pub top_p: f64,
    pub client_processing_time: u32,
}

/// Builds the payload: `history` plus `new_message` as the final user turn, with fresh ids.
pub fn build_request(
    config: &InferenceConfig,
    history: &[ChatMessage],
    new_message: &str,
) -> InferenceRequest {
    let ids = RequestIds::generate();
    InferenceRequest {
        request_id: ids.request_id,
        conversation_type: "text".to_string(),
        kind: "text".to_string(),
        model_id: config.model_id.clone(),
        model_name: config.model_name.clone(),
        model_type: "text".to_string(),
        prompt: with_user_message(history, new_message),
        system_prompt: String::new(),
        message_id: ids.message_id,
        include_venice_system_prompt: true,
        is_character: false,
        user_id: ids.user_id,
        simple_mode: false,
        character_id: String::new(),
        id: String::new(),
        text_to_speech: TextToSpeech {
            voice_id: TTS_VOICE_ID.to_string(),
            speed: 1,
        },
        web_enabled: true,
        reasoning: true,
        temperature: TEMPERATURE,
        top_p: TOP_P,
        client_processing_time: CLIENT_PROCESSING_TIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_fresh_per_call() {
        let config = InferenceConfig::default();
        let a = build_request(&config, &[], "hi");
        let b = build_request(&config, &[], "hi");

        assert_ne!(a.request_id, b.request_id);
        assert_ne!(a.message_id, b.message_id);
        assert_ne!(a.user_id, b.user_id);
        assert!(a.request_id.starts_with("req_"));
        assert_eq!(a.request_id.len(), "req_".len() + 32);
        assert!(a.user_id.starts_with("user_anon_"));
    }

    #[test]
    fn test_prompt_ends_with_new_user_message() {
        let history = vec![ChatMessage::user("q1"), ChatMessage::assistant("a1")];
        let request = build_request(&InferenceConfig::default(), &history, "q2");

        assert_eq!(request.prompt.len(), 3);
        assert_eq!(request.prompt[2], ChatMessage::user("q2"));
    }

    #[test]
    fn test_wire_field_names() {
        let request = build_request(&InferenceConfig::default(), &[], "hello");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["type"], "text");
        assert_eq!(json["conversationType"], "text");
        assert_eq!(json["modelId"], "dolphin-3.0-mistral-24b");
        assert_eq!(json["temperature"], 0.3);
        assert_eq!(json["topP"], 1.0);
        assert_eq!(json["textToSpeech"]["voiceId"], "af_sky");
        assert_eq!(json["includeVeniceSystemPrompt"], true);
        assert_eq!(json["prompt"][0]["role"], "user");
        assert_eq!(json["prompt"][0]["content"], "hello");
    }
}
