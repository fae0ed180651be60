mod cli;

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use axiom_client::{auth, Difficulty, HttpTutorClient, Topic, TutorClient};
use axiom_config::Config;
use axiom_core::{
    segment, ConversationController, Message, SegmentKind, SubmitOutcome, TurnEvent,
};
use axiom_tui::{App, AppOptions};
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Handle subcommands that don't need a tutor connection first.
    if let Some(cmd) = &cli.command {
        match cmd {
            Commands::Completions { shell } => {
                cli::print_completions(*shell);
                return Ok(());
            }
            Commands::ShowConfig => {
                let config = effective_config(&cli)?;
                println!("{}", serde_yaml::to_string(&config).unwrap_or_default());
                return Ok(());
            }
            Commands::Login { email, password } => {
                let config = effective_config(&cli)?;
                return login_cmd(&config, email, password.as_deref()).await;
            }
            Commands::Register { email, password } => {
                let config = effective_config(&cli)?;
                return register_cmd(&config, email, password.as_deref()).await;
            }
            Commands::Logout => {
                auth::clear_token()?;
                println!("Logged out.");
                return Ok(());
            }
            Commands::Ask { .. } => {} // needs config and client, handled below
        }
    }

    let config = Arc::new(effective_config(&cli)?);
    let (topic, difficulty) = session_prefs(&cli, &config)?;
    let client = build_client(&cli, &config)?;

    if let Some(Commands::Ask { question }) = &cli.command {
        return run_ask(client, topic, difficulty, question).await;
    }

    run_tui(cli, config, client, topic, difficulty).await
}

/// Load the layered config and fold in CLI overrides.
fn effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = axiom_config::load(cli.config.as_deref())?;
    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }
    if let Some(topic) = &cli.topic {
        config.session.topic = topic.clone();
    }
    if let Some(difficulty) = &cli.difficulty {
        config.session.difficulty = difficulty.clone();
    }
    Ok(config)
}

/// Parse the effective topic/difficulty strings into their enumerations.
fn session_prefs(cli: &Cli, config: &Config) -> anyhow::Result<(Topic, Difficulty)> {
    let _ = cli; // overrides already folded into config
    let topic: Topic = config.session.topic.parse().map_err(anyhow::Error::msg)?;
    let difficulty: Difficulty = config
        .session
        .difficulty
        .parse()
        .map_err(anyhow::Error::msg)?;
    Ok((topic, difficulty))
}

/// Resolve the bearer token and construct the HTTP client.
fn build_client(cli: &Cli, config: &Config) -> anyhow::Result<Arc<dyn TutorClient>> {
    let token = match &cli.token {
        Some(t) => t.clone(),
        None => auth::load_token()?.unwrap_or_default(),
    };
    if token.is_empty() {
        bail!(
            "no credentials found — run `axiom login <email>` first,\n\
             or pass --token / set AXIOM_TOKEN"
        );
    }
    let client = HttpTutorClient::new(
        &config.server.base_url,
        token,
        config.server.timeout_secs,
    )?;
    Ok(Arc::new(client))
}

// ── Subcommands ───────────────────────────────────────────────────────────────

async fn login_cmd(config: &Config, email: &str, password: Option<&str>) -> anyhow::Result<()> {
    let password = resolve_password(password)?;
    let creds = auth::login(&config.server.base_url, email, &password).await?;
    auth::save_token(&creds.access_token)?;
    println!("Logged in as {email}. Token stored at {}", auth::token_path().display());
    Ok(())
}

async fn register_cmd(config: &Config, email: &str, password: Option<&str>) -> anyhow::Result<()> {
    let password = resolve_password(password)?;
    auth::register(&config.server.base_url, email, &password).await?;
    println!("Account created for {email}. Run `axiom login {email}` to sign in.");
    Ok(())
}

fn resolve_password(password: Option<&str>) -> anyhow::Result<String> {
    if let Some(p) = password {
        return Ok(p.to_string());
    }
    eprint!("Password: ");
    std::io::stderr().flush().ok();
    let mut buf = String::new();
    std::io::stdin()
        .read_line(&mut buf)
        .context("reading password from stdin")?;
    let p = buf.trim_end_matches(['\r', '\n']).to_string();
    if p.is_empty() {
        bail!("empty password");
    }
    Ok(p)
}

// ── Headless ask ──────────────────────────────────────────────────────────────

/// Submit a single question and print the tutor's reply to stdout.
async fn run_ask(
    client: Arc<dyn TutorClient>,
    topic: Topic,
    difficulty: Difficulty,
    question: &str,
) -> anyhow::Result<()> {
    let mut controller = ConversationController::new(client, topic, difficulty);
    let (tx, mut rx) = mpsc::channel::<TurnEvent>(8);

    let outcome = controller.submit_turn(question, &tx).await;
    if outcome != SubmitOutcome::Completed {
        bail!("nothing to ask (empty question)");
    }
    drop(tx);

    while let Some(event) = rx.recv().await {
        if let TurnEvent::AssistantMessage(m) = event {
            if m.error {
                bail!("{}", m.content);
            }
            print_reply(&m);
        }
    }
    Ok(())
}

/// Plain-text rendering for headless output: block math on its own lines,
/// everything else in flow, steps as a numbered list.
fn print_reply(msg: &Message) {
    for seg in segment(&msg.content) {
        match seg.kind {
            SegmentKind::BlockMath => println!("\n    {}", seg.text),
            _ => print!("{}", seg.text),
        }
    }
    println!();
    for (i, step) in msg.steps.iter().enumerate() {
        let n = step.index.unwrap_or(i as u32 + 1);
        println!("  {n}. {}", step.text);
    }
}

// ── TUI ───────────────────────────────────────────────────────────────────────

async fn run_tui(
    cli: Cli,
    config: Arc<Config>,
    client: Arc<dyn TutorClient>,
    topic: Topic,
    difficulty: Difficulty,
) -> anyhow::Result<()> {
    let terminal = ratatui::init();

    let opts = AppOptions {
        topic,
        difficulty,
        initial_prompt: cli.question,
    };

    let app = App::new(config, client, opts);
    let result = app.run(terminal).await;

    ratatui::restore();

    result
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
