use anyhow::{Context, Result};
use clap::Parser;
use intern_core::{InternConfig, RecordKind, POST_CHAR_LIMIT};
use intern_memory::MemoryStore;
use intern_reasoning::{providers, TweetGenerator};
use intern_social::{Publisher, TwitterClient};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generate a post but do not publish it
    #[arg(long)]
    dry_run: bool,

    /// Record this post as an important milestone
    #[arg(long)]
    add_milestone: bool,

    /// Run without Twitter credentials; nothing is published
    #[arg(long)]
    test_mode: bool,

    /// Clear all memories and start fresh
    #[arg(long)]
    reset: bool,

    /// Print every stored memory without generating a new post
    #[arg(long)]
    view_memories: bool,

    /// Path to the memory file (overrides config and MEMORY_FILE)
    #[arg(long)]
    memory_file: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, env = "INTERN_CONFIG", default_value = "intern.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = InternConfig::load_or_default(&args.config)?;
    let memory_file = args
        .memory_file
        .clone()
        .unwrap_or_else(|| config.storage.memory_file.clone());

    if args.reset {
        reset_memories(&memory_file)?;
        println!("All memories have been reset.");
        return Ok(ExitCode::SUCCESS);
    }

    if args.view_memories {
        view_memories(&memory_file)?;
        return Ok(ExitCode::SUCCESS);
    }

    run_bot(&args, config, &memory_file).await
}

async fn run_bot(args: &Args, config: InternConfig, memory_file: &Path) -> Result<ExitCode> {
    let mut store = MemoryStore::open(memory_file)?;
    info!(
        "Loaded {} memories from {}",
        store.count(),
        memory_file.display()
    );

    let client = providers::from_config(&config.llm)
        .with_context(|| format!("Failed to initialize {} client", config.llm.provider))?;
    let generator = TweetGenerator::new(client, config.persona.clone(), config.project.clone());

    let kind = if args.add_milestone {
        RecordKind::Milestone
    } else {
        RecordKind::Daily
    };
    let now = chrono::Local::now().naive_local();

    let memory = match generator.generate_and_record(&mut store, kind, now).await {
        Ok(memory) => memory,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let tweet = memory.text();
    println!("\n----------- Generated Tweet -----------");
    println!("{}", tweet);
    println!("--------------------------------------\n");
    println!("Character count: {}/{}", tweet.chars().count(), POST_CHAR_LIMIT);
    match kind {
        RecordKind::Milestone => println!("Saved as milestone memory"),
        RecordKind::Daily => println!("Saved as normal memory"),
    }

    if args.dry_run || args.test_mode {
        println!("Not posting to Twitter - running in dry run or test mode");
        return Ok(ExitCode::SUCCESS);
    }

    match publish(&config, tweet).await {
        Ok(id) => {
            println!("Successfully posted to Twitter with ID: {}", id);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("Failed to post to Twitter: {:#}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn publish(config: &InternConfig, text: &str) -> Result<String> {
    let twitter = config
        .twitter
        .as_ref()
        .context("Twitter credentials are not configured (set TWITTER_BEARER_TOKEN)")?;
    let client = TwitterClient::new(twitter)?;

    match client.verify_credentials().await {
        Ok(username) => info!("Twitter authentication successful as @{}", username),
        Err(e) => warn!("Twitter authentication check failed: {}", e),
    }

    Ok(client.publish(text).await?)
}

fn reset_memories(memory_file: &Path) -> Result<()> {
    let existed = MemoryStore::reset(memory_file)?;
    if existed {
        println!("Memory file deleted: {}", memory_file.display());
    } else {
        println!("No memory file found at {}", memory_file.display());
    }
    println!("Created new empty memories file");
    Ok(())
}

fn view_memories(memory_file: &Path) -> Result<()> {
    let store = MemoryStore::open(memory_file)?;
    let memories = store.chronological();

    if memories.is_empty() {
        println!("No memories stored yet.");
        return Ok(());
    }

    println!("\n===== All Memories ({}) =====", memories.len());
    for (i, memory) in memories.iter().enumerate() {
        println!(
            "\n[{}] {} - Importance: {:?}",
            i + 1,
            memory.timestamp().format("%Y-%m-%d %H:%M"),
            memory.importance()
        );
        println!("Category: {}", memory.category());
        println!("Text: {}", memory.text());
    }
    println!("\n===================================");
    Ok(())
}
