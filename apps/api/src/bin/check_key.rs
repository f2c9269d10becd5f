//! Smoke test for an OpenAI API key: one chat completion, printed to stdout.
//! Not used by the query service.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    println!("Attempting to load API key from .env file...");

    match run().await {
        Ok(reply) => {
            println!("API call successful!");
            println!("Response: {reply}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("\n--- AN ERROR OCCURRED ---");
            println!("Error: {e:#}");
            println!("\nTroubleshooting:");
            println!("1. Is your .env file named correctly and in the same folder?");
            println!("2. Is the variable name OPENAI_API_KEY?");
            println!("3. Is the key itself valid and do you have credits on your OpenAI account?");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<String> {
    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;
    anyhow::ensure!(!api_key.trim().is_empty(), "OPENAI_API_KEY is empty");
    println!("API key loaded successfully.");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .context("failed to build HTTP client")?;

    println!("Making a test API call...");
    let response = client
        .post(OPENAI_CHAT_URL)
        .bearer_auth(api_key.trim())
        .json(&hello_request())
        .send()
        .await
        .context("request to OpenAI failed")?;

    let status = response.status();
    let body = response.text().await.context("failed to read OpenAI response")?;
    if !status.is_success() {
        anyhow::bail!("OpenAI returned {status}: {}", error_message(&body));
    }

    first_reply(&body)
}

fn hello_request() -> ChatRequest<'static> {
    ChatRequest {
        model: MODEL,
        messages: vec![
            ChatMessage {
                role: "system",
                content: "You are a helpful assistant.",
            },
            ChatMessage {
                role: "user",
                content: "Hello!",
            },
        ],
    }
}

fn first_reply(body: &str) -> Result<String> {
    let parsed: ChatResponse =
        serde_json::from_str(body).context("failed to parse OpenAI response")?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .context("OpenAI returned no message content")
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<OpenAiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}
