use crate::error::{AiHelperError, Result};
use bytes::Bytes;
use serde_json::Value;

/// What a transport call hands back: parsed JSON or raw bytes (audio).
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Binary(Bytes),
}

impl ApiResponse {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Binary(_) => None,
        }
    }

    pub fn into_json(self) -> Result<Value> {
        match self {
            ApiResponse::Json(value) => Ok(value),
            ApiResponse::Binary(bytes) => Err(AiHelperError::UnexpectedResponse(format!(
                "expected JSON, got {} bytes of binary content",
                bytes.len()
            ))),
        }
    }

    pub fn into_bytes(self) -> Result<Bytes> {
        match self {
            ApiResponse::Binary(bytes) => Ok(bytes),
            ApiResponse::Json(_) => Err(AiHelperError::UnexpectedResponse(
                "expected binary content, got JSON".to_string(),
            )),
        }
    }
}

fn first_message(response_json: &Value) -> Result<&Value> {
    let choices = response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| AiHelperError::UnexpectedResponse("No choices in response".to_string()))?;

    let first_choice = choices
        .first()
        .ok_or_else(|| AiHelperError::UnexpectedResponse("Empty choices array".to_string()))?;

    first_choice
        .get("message")
        .ok_or_else(|| AiHelperError::UnexpectedResponse("No message in response".to_string()))
}

/// Extract `choices[0].message.content` from a chat completion
pub fn extract_content(response_json: &Value) -> Result<Option<String>> {
    let message = first_message(response_json)?;

    Ok(message
        .get("content")
        .and_then(|c| c.as_str())
        .map(|s| s.to_string()))
}

/// Extract tool calls the model asked for, if any
pub fn parse_tool_calls(response_json: &Value) -> Result<Option<Vec<Value>>> {
    let message = first_message(response_json)?;

    if let Some(tool_calls) = message.get("tool_calls").and_then(|tc| tc.as_array()) {
        if !tool_calls.is_empty() {
            return Ok(Some(tool_calls.clone()));
        }
    }

    Ok(None)
}

/// `choices[0].delta.content` of a streamed chunk
pub fn extract_delta_content(chunk: &Value) -> Option<&str> {
    chunk
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()
}
