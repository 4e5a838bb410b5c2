//! Thin adapters over an OpenAI-compatible JSON REST API.
//!
//! Each adapter binds one endpoint path to a [`api::Transport`] and forwards
//! the caller's [`api::Parameters`] untouched. [`api::OpenAiClient`] is the
//! reqwest-backed transport.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tokens;

pub use api::{
    ApiResponse, Audio, ClientConfig, Completion, Images, Models, OpenAiClient, Parameters,
    Speech, Transport,
};
pub use error::{AiHelperError, Result};
