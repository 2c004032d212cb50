mod ai;
mod app;
mod config;
mod constants;
mod input;
mod mail;
mod store;
mod ui;

use anyhow::{Context, Result};
use std::env;
use std::io::Read;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ai::{OpenAiClient, tasks};
use crate::app::App;
use crate::config::Config;
use crate::mail::EmailRecord;
use crate::store::{PromptStore, load_inbox, seed_inbox};

/// Log to `mailmind.log` in the config directory, or to stderr for
/// headless commands and when the file cannot be opened.
fn setup_logging(to_file: bool) {
    use std::fs::OpenOptions;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,mailmind=debug"));

    let log_file = to_file
        .then(|| Config::config_dir().ok())
        .flatten()
        .and_then(|dir| std::fs::create_dir_all(&dir).ok().map(|_| dir))
        .map(|dir| dir.join("mailmind.log"))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"mailmind - LLM-assisted email triage in the terminal

Usage: mailmind [command]

Commands:
    (none)        Start the terminal UI
    init          Write a default config and seed the prompt and inbox files
    process <n>   Categorize email n (1-based) and print the result as JSON
    draft <n>     Draft a reply to email n
    recover       Read model output on stdin and print the recovered JSON
    help          Show this help message

Configuration file: ~/.config/mailmind/config.toml
API key: ai.api_key, MAILMIND_API_KEY or OPENAI_API_KEY
"#
    );
}

fn run_init() -> Result<()> {
    let config_path = Config::config_path()?;
    let config = if config_path.exists() {
        println!("Config already exists: {}", config_path.display());
        Config::load_from(&config_path)?
    } else {
        let config = Config::default();
        config.save()?;
        println!("Wrote {}", config_path.display());
        config
    };
    config.ensure_dirs()?;

    let prompts = PromptStore::new(config.prompts_path()?);
    if prompts.seed()? {
        println!("Wrote {}", prompts.path().display());
    }
    let inbox_path = config.inbox_path()?;
    if seed_inbox(&inbox_path)? {
        println!("Wrote {}", inbox_path.display());
    }

    if config.ai.api_key().is_none() {
        println!("No API key configured; set ai.api_key or MAILMIND_API_KEY");
    }
    Ok(())
}

/// Shared setup for the commands that talk to the model
struct Headless {
    config: Config,
    prompts: PromptStore,
    emails: Vec<EmailRecord>,
}

impl Headless {
    fn open() -> Result<Self> {
        let config = Config::load()?;
        let prompts = PromptStore::new(config.prompts_path()?);
        prompts.seed()?;
        let inbox_path = config.inbox_path()?;
        seed_inbox(&inbox_path)?;
        let emails = load_inbox(&inbox_path)?;
        Ok(Self {
            config,
            prompts,
            emails,
        })
    }

    /// Email by 1-based position, as shown in the inbox list
    fn email(&self, arg: Option<&String>) -> Result<&EmailRecord> {
        let n: usize = arg
            .context("Missing email number")?
            .parse()
            .context("Email number must be a positive integer")?;
        n.checked_sub(1)
            .and_then(|i| self.emails.get(i))
            .with_context(|| format!("No email {} (inbox has {})", n, self.emails.len()))
    }

    fn client(&self) -> Result<OpenAiClient> {
        Ok(self.config.ai.build_client()?)
    }
}

async fn run_process(arg: Option<&String>) -> Result<()> {
    let headless = Headless::open()?;
    let email = headless.email(arg)?;
    let client = headless.client()?;
    let prompts = headless.prompts.load()?;

    let result = tasks::process_email(&client, &prompts, email)
        .await
        .context("AI Error")?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn run_draft(arg: Option<&String>) -> Result<()> {
    let headless = Headless::open()?;
    let email = headless.email(arg)?;
    let client = headless.client()?;
    let rule = headless.prompts.load()?.auto_reply_prompt;

    let draft = tasks::draft_reply(&client, &rule, email)
        .await
        .context("AI Error")?;
    println!("Subject: {}\n\n{}", draft.subject, draft.body);
    Ok(())
}

fn run_recover() -> Result<()> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    let recovered = ai::recover(&input);
    println!("{}", serde_json::to_string_pretty(&recovered)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("init") => run_init(),
        Some("process") => {
            setup_logging(false);
            run_process(args.get(2)).await
        }
        Some("draft") => {
            setup_logging(false);
            run_draft(args.get(2)).await
        }
        Some("recover") => run_recover(),
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => {
            setup_logging(true);

            let config = Config::load()?;
            config.ensure_dirs()?;

            // Initialize theme from config
            crate::ui::theme::init_theme(config.ui.theme);

            let mut app = App::new(&config)?;
            app.run().await
        }
    }
}
