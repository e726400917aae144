//! Interactive chat entry point.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::info;
use owo_colors::OwoColorize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use uuid::Uuid;

use pitchcraft_agent::SessionOrchestrator;
use pitchcraft_core::config::{EngineConfig, RetrievalConfig};
use pitchcraft_core::types::Message;
use pitchcraft_engines::{OpenAiEngine, VectorizeRetriever};

use crate::formatter::format_response;

#[derive(Parser, Debug)]
#[command(
    name = "pitchcraft",
    about = "Interactive assistant that turns a startup description into a critiqued pitch deck"
)]
pub struct PitchcraftArgs {
    /// Session identifier; a fresh one is generated when omitted
    #[arg(short, long)]
    session: Option<String>,

    /// Company name used when generating the deck
    #[arg(short, long)]
    company: Option<String>,
}

pub async fn run() -> Result<()> {
    env_logger::init();
    let args = PitchcraftArgs::parse();

    let engine = Arc::new(OpenAiEngine::new(EngineConfig::from_env()?)?);
    let retriever = Arc::new(VectorizeRetriever::new(RetrievalConfig::from_env()?)?);
    let orchestrator = SessionOrchestrator::new(engine, retriever);

    let session_id = args.session.unwrap_or_else(|| Uuid::new_v4().to_string());
    info!("Starting session {}", session_id);

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("{}\n", "Pitch Deck Assistant".bold().green()).as_bytes())
        .await?;
    stdout
        .write_all(
            b"Describe your startup and I'll evaluate it against startup principles.\n\
              Commands: /questions, /reset, /deck [company], /quit\n\n",
        )
        .await?;
    print_questions(&orchestrator, &mut stdout).await?;

    let mut history: Vec<Message> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" | "/exit" => break,
            "/questions" => {
                print_questions(&orchestrator, &mut stdout).await?;
            }
            "/reset" => {
                let ack = orchestrator.reset(&session_id).await?;
                history.clear();
                let message = serde_json::from_str::<Value>(&ack)
                    .ok()
                    .and_then(|v| v["message"].as_str().map(str::to_string))
                    .unwrap_or(ack);
                stdout.write_all(format!("{}\n\n", message).as_bytes()).await?;
            }
            _ if input.starts_with("/deck") => {
                let company = input
                    .strip_prefix("/deck")
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .or(args.company.as_deref());
                let response = orchestrator.generate(&session_id, company).await?;
                stdout
                    .write_all(format!("{}\n", format_response(&response)).as_bytes())
                    .await?;
            }
            _ => {
                history.push(Message::user(input));
                match orchestrator.handle_turn(&session_id, &history).await {
                    Ok(response) => {
                        history.push(Message::assistant(response.clone()));
                        stdout
                            .write_all(format!("{}\n", format_response(&response)).as_bytes())
                            .await?;
                    }
                    Err(err) => {
                        stdout
                            .write_all(format!("{}\n", err.to_string().red()).as_bytes())
                            .await?;
                    }
                }
            }
        }
    }

    Ok(())
}

async fn print_questions(
    orchestrator: &SessionOrchestrator,
    stdout: &mut tokio::io::Stdout,
) -> Result<()> {
    let payload: Value = serde_json::from_str(&orchestrator.questions().await?)?;
    if let Some(questions) = payload["questions"].as_array() {
        stdout
            .write_all(format!("{}\n", "Questions to cover:".bold()).as_bytes())
            .await?;
        for (index, question) in questions.iter().enumerate() {
            stdout
                .write_all(
                    format!(
                        "  {}. {} [{}]\n",
                        index + 1,
                        question["question"].as_str().unwrap_or(""),
                        question["priority"].as_str().unwrap_or("")
                    )
                    .as_bytes(),
                )
                .await?;
        }
        stdout.write_all(b"\n").await?;
    }
    Ok(())
}
