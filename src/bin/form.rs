//! Interactive translation form for the terminal.
//!
//! Usage:
//!   cargo run --bin translator-form
//!
//! Optional environment variables:
//! - API_BASE_URL (defaults to http://localhost:8000)

use ai_translator::client::TranslatorClient;
use ai_translator::form::{self, Command, FormState, Outcome, TextBuffer, HELP, MULTILINE_END};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Keep logs out of the way of the form unless asked for
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = TranslatorClient::from_env();
    println!("AI Translator");
    println!("{}", form::render_health(client.base_url(), &client.health().await));

    let languages = match client.languages().await {
        Ok(languages) => languages,
        Err(e) => {
            println!("Could not load supported languages: {}", e);
            println!("Configured API URL: {}", client.base_url());
            return Ok(());
        }
    };
    let Some(mut state) = FormState::new(languages) else {
        println!("The backend reported no supported languages.");
        println!("Configured API URL: {}", client.base_url());
        return Ok(());
    };

    println!("{}", HELP);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!();
        println!("{}", state.selection_line());
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        match Command::parse(&line) {
            Command::From(code) => report(state.select_source(&code)),
            Command::To(code) => report(state.select_target(&code)),
            Command::Model(model) => report(state.select_model(&model)),
            Command::Swap => state.swap(),
            Command::Languages => println!("{}", state.language_list()),
            Command::Status => {
                println!("{}", form::render_health(client.base_url(), &client.health().await))
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Unknown(input) => println!("Unknown command '{}'. Type /help.", input),
            Command::Multiline => {
                println!("Enter text; finish with a line containing only \"{}\".", MULTILINE_END);
                let mut buffer = TextBuffer::default();
                let mut text = None;
                while let Some(line) = lines.next_line().await.context("Failed to read input")? {
                    text = buffer.push(&line);
                    if text.is_some() {
                        break;
                    }
                }
                match text {
                    Some(text) => submit(&client, &state, &text).await,
                    None => break,
                }
            }
            Command::Translate(text) => submit(&client, &state, &text).await,
        }
    }

    Ok(())
}

async fn submit(client: &TranslatorClient, state: &FormState, text: &str) {
    println!("{}", form::char_counter(text));
    let request = match state.prepare(text) {
        Ok(request) => request,
        Err(e) => {
            println!("Warning: {}", e);
            return;
        }
    };

    debug!(
        "Submitting {} -> {} ({})",
        request.source_language,
        request.target_language,
        state.model()
    );
    println!("Translating...");
    let outcome = Outcome::from(client.translate(&request).await);
    println!("{}", state.render(&outcome));
}

fn report(result: Result<(), form::FormError>) {
    if let Err(e) = result {
        println!("Warning: {}", e);
    }
}
