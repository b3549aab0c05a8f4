use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;

use taskdeck_cli::tags::{handle_tags_command, ListTagsOptions, OutputFormat};

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Taskdeck CLI - task management with remote briefs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tags with task statistics
    Tags {
        /// Project root directory
        #[arg(long, default_value = ".")]
        project_root: PathBuf,
        /// Include created date and description columns
        #[arg(long)]
        show_metadata: bool,
        /// Machine-integration mode: suppress human-oriented rendering
        #[arg(long)]
        mcp: bool,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Inspect shipped prompt templates
    #[command(subcommand)]
    Prompts(PromptsCommands),
}

#[derive(Subcommand)]
enum PromptsCommands {
    /// List available templates
    List,
    /// Show one template as JSON
    Show {
        /// Template id to show
        id: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match handle_command(cli.command).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Tags {
            project_root,
            show_metadata,
            mcp,
            format,
        } => {
            let options = ListTagsOptions {
                show_metadata,
                is_mcp: mcp,
                output_format: format,
            };
            handle_tags_command(&project_root, options).await
        }
        Commands::Prompts(prompts_cmd) => handle_prompts_command(prompts_cmd),
    }
}

fn handle_prompts_command(command: PromptsCommands) -> anyhow::Result<()> {
    match command {
        PromptsCommands::List => {
            for id in taskdeck_prompts::available() {
                let template = taskdeck_prompts::load(id)?;
                println!(
                    "{}  v{}  {}",
                    id.cyan(),
                    template.version,
                    template.description.dimmed()
                );
            }
            Ok(())
        }
        PromptsCommands::Show { id } => {
            let template = taskdeck_prompts::load(&id)?;
            println!("{}", serde_json::to_string_pretty(&template)?);
            Ok(())
        }
    }
}
