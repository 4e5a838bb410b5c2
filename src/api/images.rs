use super::parameters::Parameters;
use super::response::ApiResponse;
use super::transport::Transport;
use crate::error::Result;

pub const IMAGE_GENERATIONS_PATH: &str = "/images/generations";

pub struct Images<'a> {
    client: &'a dyn Transport,
}

impl<'a> Images<'a> {
    pub fn new(client: &'a dyn Transport) -> Self {
        Self { client }
    }

    /// Usually `prompt` and `size`; image URLs come back under `data[*].url`.
    pub async fn generate(&self, parameters: Parameters) -> Result<ApiResponse> {
        self.client
            .json_post(IMAGE_GENERATIONS_PATH, parameters)
            .await
    }
}
