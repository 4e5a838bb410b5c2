pub mod audio;
pub mod client;
pub mod completion;
pub mod images;
pub mod models;
pub mod parameters;
pub mod response;
pub mod speech;
pub mod streaming;
pub mod transport;

pub use audio::Audio;
pub use client::{ClientConfig, OpenAiClient};
pub use completion::Completion;
pub use images::Images;
pub use models::Models;
pub use parameters::{FileUpload, Parameters, StreamCallback};
pub use response::ApiResponse;
pub use speech::Speech;
pub use transport::Transport;
