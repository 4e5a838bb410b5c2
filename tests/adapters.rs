use aihelper::api::{Audio, Completion, Images, Models, Speech, Transport};
use aihelper::{AiHelperError, ApiResponse, Parameters, Result};
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Value};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
struct RecordedCall {
    method: &'static str,
    path: String,
    body: Option<Value>,
    streaming: bool,
    files: usize,
}

/// Stub transport that records every call and replays a canned outcome.
struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    reply: fn() -> Result<ApiResponse>,
}

impl RecordingTransport {
    fn replying(reply: fn() -> Result<ApiResponse>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply,
        }
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, path: &str, parameters: Option<Parameters>) {
        let call = match parameters {
            Some(p) => RecordedCall {
                method,
                path: path.to_string(),
                body: Some(p.body().clone()),
                streaming: p.is_streaming(),
                files: p.files().len(),
            },
            None => RecordedCall {
                method,
                path: path.to_string(),
                body: None,
                streaming: false,
                files: 0,
            },
        };
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn json_post(&self, path: &str, parameters: Parameters) -> Result<ApiResponse> {
        self.record("json_post", path, Some(parameters));
        (self.reply)()
    }

    async fn multipart_post(&self, path: &str, parameters: Parameters) -> Result<ApiResponse> {
        self.record("multipart_post", path, Some(parameters));
        (self.reply)()
    }

    async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.record("get", path, None);
        (self.reply)()
    }
}

fn chat_reply() -> Result<ApiResponse> {
    Ok(ApiResponse::Json(json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": "hello there"}}]
    })))
}

fn audio_reply() -> Result<ApiResponse> {
    Ok(ApiResponse::Binary(Bytes::from_static(b"ID3\x04fake-mp3")))
}

fn rate_limited_reply() -> Result<ApiResponse> {
    Err(AiHelperError::ApiError {
        status: 429,
        message: "Rate limit reached for gpt-4".to_string(),
    })
}

fn timeout_reply() -> Result<ApiResponse> {
    Err(AiHelperError::Timeout)
}

#[tokio::test]
async fn test_completion_posts_body_unchanged_to_chat_completions() {
    let transport = RecordingTransport::replying(chat_reply);
    let body = json!({"model": "gpt-4", "messages": [{"role": "user", "content": "hi"}]});

    let response = Completion::new(&transport)
        .create(Parameters::new(body.clone()))
        .await
        .unwrap();

    assert_eq!(
        transport.calls(),
        vec![RecordedCall {
            method: "json_post",
            path: "/chat/completions".to_string(),
            body: Some(body),
            streaming: false,
            files: 0,
        }]
    );
    assert_eq!(response, chat_reply().unwrap());
}

#[tokio::test]
async fn test_completion_does_not_validate_required_fields() {
    let transport = RecordingTransport::replying(chat_reply);

    Completion::new(&transport)
        .create(Parameters::new(json!({"temperature": 0.7})))
        .await
        .unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, Some(json!({"temperature": 0.7})));
}

#[tokio::test]
async fn test_completion_passes_stream_callback_through() {
    let transport = RecordingTransport::replying(chat_reply);
    let body = json!({"model": "gpt-4", "messages": [], "temperature": 0.9});

    Completion::new(&transport)
        .create(Parameters::new(body.clone()).with_stream(|_| {}))
        .await
        .unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].streaming);
    assert_eq!(calls[0].body, Some(body));
}

#[tokio::test]
async fn test_completion_propagates_error_unchanged() {
    let transport = RecordingTransport::replying(rate_limited_reply);

    let err = Completion::new(&transport)
        .create(Parameters::new(json!({"model": "gpt-4"})))
        .await
        .unwrap_err();

    match err {
        AiHelperError::ApiError { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit reached for gpt-4");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn test_speech_posts_to_audio_speech_and_returns_bytes() {
    let transport = RecordingTransport::replying(audio_reply);
    let body = json!({"model": "tts-1", "input": "hello", "voice": "nova"});

    let response = Speech::new(&transport)
        .create(Parameters::new(body.clone()))
        .await
        .unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "json_post");
    assert_eq!(calls[0].path, "/audio/speech");
    assert_eq!(calls[0].body, Some(body));
    assert_eq!(
        response.into_bytes().unwrap(),
        Bytes::from_static(b"ID3\x04fake-mp3")
    );
}

#[tokio::test]
async fn test_speech_accepts_any_voice_value() {
    let transport = RecordingTransport::replying(audio_reply);
    let body = json!({"model": "tts-1", "input": "hello", "voice": "not-a-real-voice"});

    Speech::new(&transport)
        .create(Parameters::new(body.clone()))
        .await
        .unwrap();

    assert_eq!(transport.calls()[0].body, Some(body));
}

#[tokio::test]
async fn test_speech_propagates_error_unchanged() {
    let transport = RecordingTransport::replying(timeout_reply);

    let err = Speech::new(&transport)
        .create(Parameters::new(json!({"model": "tts-1"})))
        .await
        .unwrap_err();

    assert!(matches!(err, AiHelperError::Timeout));
}

#[tokio::test]
async fn test_images_generate_posts_to_image_generations() {
    let transport = RecordingTransport::replying(chat_reply);
    let body = json!({"prompt": "a lighthouse at dusk", "size": "1024x1024"});

    Images::new(&transport)
        .generate(Parameters::new(body.clone()))
        .await
        .unwrap();

    let calls = transport.calls();
    assert_eq!(calls[0].method, "json_post");
    assert_eq!(calls[0].path, "/images/generations");
    assert_eq!(calls[0].body, Some(body));
}

#[tokio::test]
async fn test_audio_uses_multipart_with_attached_file() {
    let transport = RecordingTransport::replying(chat_reply);
    let audio = Audio::new(&transport);

    audio
        .transcribe(Parameters::new(json!({"model": "whisper-1"})).with_file("file", "clip.m4a"))
        .await
        .unwrap();
    audio
        .translate(Parameters::new(json!({"model": "whisper-1"})).with_file("file", "clip.m4a"))
        .await
        .unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method, "multipart_post");
    assert_eq!(calls[0].path, "/audio/transcriptions");
    assert_eq!(calls[0].files, 1);
    assert_eq!(calls[1].path, "/audio/translations");
}

#[tokio::test]
async fn test_models_list_is_a_get() {
    let transport = RecordingTransport::replying(chat_reply);

    Models::new(&transport).list().await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "get");
    assert_eq!(calls[0].path, "/models");
    assert_eq!(calls[0].body, None);
}
