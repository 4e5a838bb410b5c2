use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "aihelper")]
#[command(about = "Small command-line helper for OpenAI-compatible APIs", long_about = None)]
pub struct Args {
    #[arg(
        long = "api-base",
        global = true,
        help = "Custom API base URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_base: Option<String>,

    #[arg(long = "model", global = true, help = "Model to use for chat")]
    pub model: Option<String>,

    #[arg(short = 'v', long = "verbose", global = true, help = "Log requests to stderr")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a single chat message
    Chat {
        #[arg(short = 't', long = "temperature", help = "Sampling temperature")]
        temperature: Option<f64>,

        #[arg(short = 's', long = "stream", help = "Print the answer as it arrives")]
        stream: bool,

        #[arg(long = "system", help = "System prompt")]
        system: Option<String>,

        #[arg(required = true, help = "Prompt to send")]
        prompt: Vec<String>,
    },

    /// Turn text into speech
    Speech {
        #[arg(long = "speech-model", default_value_t = crate::config::defaults::default_speech_model())]
        speech_model: String,

        #[arg(long = "voice", default_value_t = crate::config::defaults::default_voice(), help = "alloy, echo, fable, onyx, nova or shimmer")]
        voice: String,

        #[arg(short = 'o', long = "output", default_value = "output.mp3")]
        output: PathBuf,

        #[arg(required = true, help = "Text to speak")]
        text: Vec<String>,
    },

    /// Generate an image from a prompt
    Image {
        #[arg(long = "size", default_value = "1024x1024")]
        size: String,

        #[arg(required = true)]
        prompt: Vec<String>,
    },

    /// Transcribe an audio file
    Transcribe {
        file: PathBuf,

        #[arg(long = "audio-model", default_value_t = crate::config::defaults::default_transcription_model())]
        audio_model: String,

        #[arg(long = "language", help = "ISO-639-1 language of the audio")]
        language: Option<String>,
    },

    /// Transcribe an audio file and translate it into English
    Translate {
        file: PathBuf,

        #[arg(long = "audio-model", default_value_t = crate::config::defaults::default_transcription_model())]
        audio_model: String,
    },

    /// List available models
    Models,

    /// Estimate how many tokens a text uses
    Tokens {
        #[arg(required = true)]
        text: Vec<String>,
    },
}
