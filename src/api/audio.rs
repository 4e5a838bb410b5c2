use super::parameters::Parameters;
use super::response::ApiResponse;
use super::transport::Transport;
use crate::error::Result;

pub const TRANSCRIPTIONS_PATH: &str = "/audio/transcriptions";
pub const TRANSLATIONS_PATH: &str = "/audio/translations";

/// Speech-to-text endpoints. Both expect the audio attached with
/// [`Parameters::with_file`] under the `file` field.
pub struct Audio<'a> {
    client: &'a dyn Transport,
}

impl<'a> Audio<'a> {
    pub fn new(client: &'a dyn Transport) -> Self {
        Self { client }
    }

    pub async fn transcribe(&self, parameters: Parameters) -> Result<ApiResponse> {
        self.client
            .multipart_post(TRANSCRIPTIONS_PATH, parameters)
            .await
    }

    /// Transcribe and translate into English.
    pub async fn translate(&self, parameters: Parameters) -> Result<ApiResponse> {
        self.client
            .multipart_post(TRANSLATIONS_PATH, parameters)
            .await
    }
}
