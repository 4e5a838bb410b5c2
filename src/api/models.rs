use super::response::ApiResponse;
use super::transport::Transport;
use crate::error::Result;

pub const MODELS_PATH: &str = "/models";

pub struct Models<'a> {
    client: &'a dyn Transport,
}

impl<'a> Models<'a> {
    pub fn new(client: &'a dyn Transport) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<ApiResponse> {
        self.client.get(MODELS_PATH).await
    }
}
