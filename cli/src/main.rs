//! Command-line interface for quern.
//!
//! Three subcommands cover the document lifecycle:
//!
//! ```bash
//! # Ingest a document into the vector index
//! quern ingest handbook.txt --chunk-size 500
//!
//! # Serve the chat API
//! quern serve --addr 127.0.0.1:8000
//!
//! # One-off question from the terminal
//! quern ask "What does AllofTech offer?"
//! ```
//!
//! Connection settings come from the environment; see [`config::Settings`].

mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quern_rag::chunking::DEFAULT_CHUNK_SIZE;
use quern_rag::{
    DEFAULT_BUDGET, DEFAULT_TOP_K, IngestStage, Ingestor, PromptTemplate, QueryConfig,
    QueryPipeline, WordChunker,
};
use quern_server::Server;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Retrieval-augmented chat over your own documents.
#[derive(Parser, Debug)]
#[command(name = "quern", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest a UTF-8 text file into the vector index.
    Ingest {
        /// Path of the document to ingest.
        file: PathBuf,

        /// Words per chunk.
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },

    /// Serve the chat API over HTTP.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: SocketAddr,

        /// Chunks to retrieve per question.
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,

        /// Seconds allowed per request across embed, retrieve, and generate.
        #[arg(long, default_value_t = DEFAULT_BUDGET.as_secs())]
        budget: u64,

        /// Instructions placed ahead of the retrieved context.
        #[arg(long)]
        preamble: Option<String>,
    },

    /// Ask a single question from the terminal.
    Ask {
        /// The question to answer.
        question: String,

        /// Chunks to retrieve.
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let settings = Settings::from_env()?;

    match args.command {
        Command::Ingest { file, chunk_size } => run_ingest(&settings, &file, chunk_size).await,
        Command::Serve {
            addr,
            top_k,
            budget,
            preamble,
        } => run_serve(&settings, addr, top_k, budget, preamble).await,
        Command::Ask { question, top_k } => run_ask(&settings, &question, top_k).await,
    }
}

async fn run_ingest(settings: &Settings, file: &Path, chunk_size: usize) -> Result<()> {
    let ingestor = Ingestor::new(settings.model_client(), settings.index_client())
        .with_chunker(WordChunker::new(chunk_size)?);

    let report = ingestor
        .ingest_file_with_progress(file, |progress| match progress.stage {
            IngestStage::Embed => println!("  embed {}/{}", progress.completed + 1, progress.total),
            stage => println!("  {stage}"),
        })
        .await?;

    println!(
        "Ingested {}: {} chunks, {} records written.",
        file.display(),
        report.chunks,
        report.upserted
    );
    Ok(())
}

async fn run_serve(
    settings: &Settings,
    addr: SocketAddr,
    top_k: usize,
    budget: u64,
    preamble: Option<String>,
) -> Result<()> {
    let config = QueryConfig::builder()
        .top_k(top_k)
        .budget(Duration::from_secs(budget))
        .build();
    let template = match preamble {
        Some(preamble) => PromptTemplate::default().with_preamble(preamble),
        None => PromptTemplate::default(),
    };

    let model = settings.model_client();
    let pipeline = QueryPipeline::new(model.clone(), settings.index_client(), model)
        .with_template(template)
        .with_config(config);

    let server = Server::bind(addr, pipeline).await?;
    println!("Serving chat on http://{}", server.local_addr()?);
    server.run().await?;
    Ok(())
}

async fn run_ask(settings: &Settings, question: &str, top_k: usize) -> Result<()> {
    let config = QueryConfig::builder().top_k(top_k).build();
    let model = settings.model_client();
    let pipeline =
        QueryPipeline::new(model.clone(), settings.index_client(), model).with_config(config);

    let outcome = pipeline.answer(question).await;
    match (outcome.reply, outcome.error) {
        (Some(reply), _) => {
            println!("{reply}");
            Ok(())
        }
        (None, error) => {
            eprintln!("error: {}", error.as_deref().unwrap_or("unknown"));
            std::process::exit(1);
        }
    }
}
