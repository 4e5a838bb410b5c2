use super::parameters::Parameters;
use super::response::ApiResponse;
use crate::error::Result;
use async_trait::async_trait;

/// The HTTP collaborator every adapter talks to.
///
/// Implementations own authentication, the base URL, timeouts and the wire
/// format. Adapters only pick a path and forward the caller's parameters.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `parameters` as a JSON body to `path`.
    async fn json_post(&self, path: &str, parameters: Parameters) -> Result<ApiResponse>;

    /// POST `parameters` as a multipart form, attaching any uploaded files.
    async fn multipart_post(&self, path: &str, parameters: Parameters) -> Result<ApiResponse>;

    async fn get(&self, path: &str) -> Result<ApiResponse>;
}
