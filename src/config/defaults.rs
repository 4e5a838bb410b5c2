pub fn default_base_url() -> String {
    crate::api::client::DEFAULT_BASE_URL.to_string()
}

pub fn default_request_timeout() -> u64 {
    120
}

pub fn default_stream_timeout() -> u64 {
    30
}

pub fn default_chat_model() -> String {
    "gpt-3.5-turbo".to_string()
}

pub fn default_speech_model() -> String {
    "tts-1".to_string()
}

pub fn default_voice() -> String {
    "nova".to_string()
}

pub fn default_transcription_model() -> String {
    "whisper-1".to_string()
}
