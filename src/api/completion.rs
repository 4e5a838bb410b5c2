use super::parameters::Parameters;
use super::response::ApiResponse;
use super::transport::Transport;
use crate::error::Result;

pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Chat completion endpoint.
pub struct Completion<'a> {
    client: &'a dyn Transport,
}

impl<'a> Completion<'a> {
    pub fn new(client: &'a dyn Transport) -> Self {
        Self { client }
    }

    /// Send `parameters` (typically `model`, `messages`, `temperature`) as is.
    /// A stream callback on the parameters receives each chunk as it arrives.
    pub async fn create(&self, parameters: Parameters) -> Result<ApiResponse> {
        self.client
            .json_post(CHAT_COMPLETIONS_PATH, parameters)
            .await
    }
}
