use super::parameters::Parameters;
use super::response::ApiResponse;
use super::transport::Transport;
use crate::error::Result;

pub const SPEECH_PATH: &str = "/audio/speech";

/// Text-to-speech endpoint. The audio comes back as raw bytes; writing it
/// anywhere is up to the caller.
pub struct Speech<'a> {
    client: &'a dyn Transport,
}

impl<'a> Speech<'a> {
    pub fn new(client: &'a dyn Transport) -> Self {
        Self { client }
    }

    pub async fn create(&self, parameters: Parameters) -> Result<ApiResponse> {
        self.client.json_post(SPEECH_PATH, parameters).await
    }
}
