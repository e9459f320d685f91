use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use runtime::{AppConfig, CliOverrides};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use student_records::{domain::page::PageSize, HttpStudentStore, RecordTable, StudentRecordsConfig};
use student_store::StudentStoreConfig;
use tokio::net::TcpListener;

mod console;

use console::Console;

const RECORDS_MODULE: &str = "student_records";
const STORE_MODULE: &str = "student_store";

/// Students Admin - record table console and record store server
#[derive(Parser)]
#[command(name = "students-admin")]
#[command(about = "Students Admin - record table console and record store server")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for the record store server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Record store address for the table console (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the record store server
    Serve,
    /// Open the record table console against a running store
    Table {
        /// Run these commands instead of reading stdin (repeatable)
        #[arg(short, long = "exec", value_name = "COMMAND")]
        exec: Vec<String>,
    },
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Defaults, then the file, then APP__* variables; flags win over all.
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_overrides(CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
    });

    runtime::logging::init_logging(&config.logging, Path::new(&config.server.home_dir));
    tracing::info!("Students Admin starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,
        Commands::Table { exec } => run_table(config, cli.base_url, exec).await,
        Commands::Check => check_config(config),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    let store_cfg: StudentStoreConfig = config.module(STORE_MODULE)?;
    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    student_store::serve(listener, &store_cfg, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
        }
    })
    .await
}

fn records_config(config: &AppConfig, base_url: Option<String>) -> Result<StudentRecordsConfig> {
    let mut cfg: StudentRecordsConfig = config.module(RECORDS_MODULE)?;
    if let Some(base_url) = base_url {
        cfg.base_url = base_url;
    }
    Ok(cfg)
}

async fn run_table(config: AppConfig, base_url: Option<String>, exec: Vec<String>) -> Result<()> {
    let cfg = records_config(&config, base_url)?;
    let page_size = PageSize::try_from(cfg.default_page_size as usize)?;
    let store = HttpStudentStore::from_config(&cfg)
        .with_context(|| format!("Invalid record store address '{}'", cfg.base_url))?;
    tracing::info!(base_url = %store.base_url(), "opening record table");

    let mut console = Console::new(RecordTable::new(Arc::new(store), page_size));
    if let Err(e) = console.load().await {
        println!("error: {e:#}");
    }

    if exec.is_empty() {
        console.run_stdin().await
    } else {
        let mut stdout = std::io::stdout();
        console.run_lines(exec, &mut stdout).await
    }
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let records = records_config(&config, None)?;
    PageSize::try_from(records.default_page_size as usize)?;
    HttpStudentStore::from_config(&records)
        .with_context(|| format!("Invalid record store address '{}'", records.base_url))?;
    let _: StudentStoreConfig = config.module(STORE_MODULE)?;

    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}
