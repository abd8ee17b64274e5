use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use session_vault::protocol::{handle_request, ContentRequest};
use session_vault::result::preview;
use session_vault::{OllamaClient, Page, Session, Settings, SiteRegistry, VaultClient};

#[derive(Parser)]
#[command(
    name = "sessionvault",
    version,
    about = "Save AI chat transcripts as Markdown notes in a local vault"
)]
struct Cli {
    /// Settings file (TOML). Defaults apply when omitted.
    #[arg(long, short, global = true, env = "SESSIONVAULT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which site a URL belongs to
    Detect { url: String },

    /// Extract a saved chat page and print the transcript
    Extract {
        /// Saved HTML of the rendered page
        #[arg(long)]
        html: PathBuf,
        /// Address the page was loaded from
        #[arg(long)]
        url: String,
        /// Print the host bridge response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract a saved chat page and write it to the vault
    Save {
        #[arg(long)]
        html: PathBuf,
        #[arg(long)]
        url: String,
        /// Skip the summary annex
        #[arg(long)]
        no_summary: bool,
        /// Add a Mermaid flow diagram annex
        #[arg(long)]
        mermaid: bool,
    },

    /// Probe the vault and inference services
    Check,

    /// List models installed in the inference service
    Models,

    /// Write a settings file with default values
    InitConfig { path: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Detect { url } => match SiteRegistry::default().detect_site(&url) {
            Some(site) => println!("{}", site.display_name()),
            None => bail!("unsupported site: {}", url),
        },
        Commands::Extract { html, url, json } => {
            let page = read_page(&html, &url)?;
            if json {
                let response = handle_request(
                    &SiteRegistry::default(),
                    &page,
                    &ContentRequest::ExtractConversation,
                );
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                let result = SiteRegistry::default().extract(&page)?;
                if settings.show_preview {
                    eprintln!("{}\n", preview(&result));
                }
                print!("{}", result.markdown_fragment);
            }
        }
        Commands::Save {
            html,
            url,
            no_summary,
            mermaid,
        } => {
            let settings = Settings {
                include_summary: settings.include_summary && !no_summary,
                include_mermaid: settings.include_mermaid || mermaid,
                ..settings
            };
            let page = read_page(&html, &url)?;

            let mut session = Session::default();
            let result = session.extract(&page)?;
            eprintln!("Extracted {} messages", result.messages.len());
            if let Some(text) = session.preview(&settings) {
                eprintln!("{}\n", text);
            }

            let annex = OllamaClient::from_settings(&settings);
            let vault = VaultClient::from_settings(&settings);
            let note = session
                .save(&settings, &annex, &vault)
                .context("Failed to save note")?;
            println!("{}", note.path);
        }
        Commands::Check => {
            let vault = VaultClient::from_settings(&settings).check_connection();
            let ollama = OllamaClient::from_settings(&settings).check_connection();
            print_status("vault", &settings.vault_endpoint, vault.connected, vault.error);
            print_status("ollama", &settings.ollama_endpoint, ollama.connected, ollama.error);
        }
        Commands::Models => {
            let models = OllamaClient::from_settings(&settings)
                .list_models()
                .with_context(|| format!("Failed to list models at {}", settings.ollama_endpoint))?;
            for model in models {
                println!("{}", model);
            }
        }
        Commands::InitConfig { path } => {
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            Settings::default().save(&path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

fn read_page(html: &Path, url: &str) -> Result<Page> {
    let raw = std::fs::read_to_string(html)
        .with_context(|| format!("Failed to read {}", html.display()))?;
    Ok(Page::parse(&raw, url))
}

fn print_status(name: &str, endpoint: &str, connected: bool, error: Option<String>) {
    match (connected, error) {
        (true, _) => println!("{name:<7} {endpoint}  connected"),
        (false, Some(e)) => println!("{name:<7} {endpoint}  not connected ({e})"),
        (false, None) => println!("{name:<7} {endpoint}  not connected"),
    }
}
