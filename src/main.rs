use aihelper::api::response::{extract_content, extract_delta_content, parse_tool_calls};
use aihelper::cli::{Args, Command};
use aihelper::config::Config;
use aihelper::error::{AiHelperError, Result};
use aihelper::logging;
use aihelper::tokens::rough_token_count;
use aihelper::{OpenAiClient, Parameters};
use clap::Parser;
use colored::*;
use serde_json::{json, Value};
use std::io::{self, Write};
use std::path::Path;
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let Some(command) = args.command.as_ref() else {
        print_usage();
        process::exit(1);
    };

    // Token estimates never touch the network or need credentials
    if let Command::Tokens { text } = command {
        println!("{}", rough_token_count(&text.join(" ")));
        return Ok(());
    }

    let early_verbose = Config::early_verbose(&args, |key| env::var(key).ok());
    let log_handle = logging::init(early_verbose);

    let config = Config::from_env_and_args(&args)?;
    if config.verbose && !early_verbose {
        log_handle.set_verbose(true);
    }
    tracing::debug!(
        "base_url={} model={}",
        config.client.base_url,
        config.model
    );

    let client = OpenAiClient::new(config.client.clone())?;

    match command {
        Command::Chat {
            temperature,
            stream,
            system,
            prompt,
        } => {
            chat(
                &client,
                &config.model,
                system.as_deref(),
                &prompt.join(" "),
                *temperature,
                *stream,
            )
            .await
        }
        Command::Speech {
            speech_model,
            voice,
            output,
            text,
        } => speech(&client, speech_model, voice, &text.join(" "), output).await,
        Command::Image { size, prompt } => image(&client, &prompt.join(" "), size).await,
        Command::Transcribe {
            file,
            audio_model,
            language,
        } => {
            let mut body = json!({ "model": audio_model });
            if let Some(language) = language {
                body["language"] = json!(language);
            }
            let response = client
                .audio()
                .transcribe(Parameters::new(body).with_file("file", file))
                .await?;
            print_text(&response.into_json()?)
        }
        Command::Translate { file, audio_model } => {
            let response = client
                .audio()
                .translate(Parameters::new(json!({ "model": audio_model })).with_file("file", file))
                .await?;
            print_text(&response.into_json()?)
        }
        Command::Models => {
            let response = client.models().list().await?.into_json()?;
            let ids = response
                .get("data")
                .and_then(|d| d.as_array())
                .ok_or_else(|| AiHelperError::UnexpectedResponse("No data in response".into()))?;
            for id in ids.iter().filter_map(|m| m.get("id").and_then(|i| i.as_str())) {
                println!("{}", id);
            }
            Ok(())
        }
        Command::Tokens { .. } => Ok(()),
    }
}

async fn chat(
    client: &OpenAiClient,
    model: &str,
    system: Option<&str>,
    prompt: &str,
    temperature: Option<f64>,
    stream: bool,
) -> Result<()> {
    let mut messages = Vec::new();
    if let Some(system) = system {
        messages.push(json!({ "role": "system", "content": system }));
    }
    messages.push(json!({ "role": "user", "content": prompt }));

    let mut body = json!({ "model": model, "messages": messages });
    if let Some(temperature) = temperature {
        body["temperature"] = json!(temperature);
    }

    if stream {
        let parameters = Parameters::new(body).with_stream(|chunk| {
            if let Some(content) = extract_delta_content(chunk) {
                print!("{}", content);
                let _ = io::stdout().flush();
            }
        });
        client.chat(parameters).await?;
        println!();
        return Ok(());
    }

    let response = client.chat(Parameters::new(body)).await?.into_json()?;
    match extract_content(&response)? {
        Some(content) => println!("{}", content),
        None => println!("{}", "(no content in response)".dimmed()),
    }

    // Nothing here runs tools; just show what the model asked for
    if let Some(tool_calls) = parse_tool_calls(&response)? {
        for call in tool_calls {
            let name = call
                .pointer("/function/name")
                .and_then(|n| n.as_str())
                .unwrap_or("<unnamed>");
            let arguments = call
                .pointer("/function/arguments")
                .and_then(|a| a.as_str())
                .unwrap_or("");
            println!("{}", format!("[tool call] {}({})", name, arguments).yellow());
        }
    }
    Ok(())
}

async fn speech(
    client: &OpenAiClient,
    model: &str,
    voice: &str,
    text: &str,
    output: &Path,
) -> Result<()> {
    let response = client
        .speech()
        .create(Parameters::new(json!({
            "model": model,
            "input": text,
            "voice": voice,
        })))
        .await?;
    let audio = response.into_bytes()?;
    tokio::fs::write(output, &audio).await?;
    println!(
        "{}",
        format!("Wrote {} bytes to {}", audio.len(), output.display()).green()
    );
    Ok(())
}

async fn image(client: &OpenAiClient, prompt: &str, size: &str) -> Result<()> {
    let response = client
        .images()
        .generate(Parameters::new(json!({ "prompt": prompt, "size": size })))
        .await?
        .into_json()?;
    let images = response
        .get("data")
        .and_then(|d| d.as_array())
        .ok_or_else(|| AiHelperError::UnexpectedResponse("No data in response".into()))?;
    for image in images {
        if let Some(url) = image.get("url").and_then(|u| u.as_str()) {
            println!("{}", url.cyan());
        }
    }
    Ok(())
}

fn print_text(response: &Value) -> Result<()> {
    let text = response
        .get("text")
        .and_then(|t| t.as_str())
        .ok_or_else(|| AiHelperError::UnexpectedResponse("No text in response".into()))?;
    println!("{}", text);
    Ok(())
}

fn print_usage() {
    println!("{}", "Usage: aihelper <COMMAND> [OPTIONS]".bold());
    println!();
    println!("Commands:");
    println!("  chat        Send a single chat message");
    println!("  speech      Turn text into speech");
    println!("  image       Generate an image from a prompt");
    println!("  transcribe  Transcribe an audio file");
    println!("  translate   Transcribe and translate into English");
    println!("  models      List available models");
    println!("  tokens      Estimate how many tokens a text uses");
    println!();
    println!("Environment:");
    println!("  OPENAI_API_KEY          API access token (required)");
    println!("  OPENAI_ORGANIZATION_ID  Organization to bill");
    println!("  OPENAI_BASE_URL         Override the API base URL");
    println!("  AI_MODEL                Default chat model");
}
