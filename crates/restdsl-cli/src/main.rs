use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use restdsl_core::config::{self, CONFIG_FILE_NAME, DestinationStrategy, RestDslConfig};
use restdsl_core::parse;
use restdsl_core::parse::spec::Swagger;
use restdsl_java::RestDslSourceGenerator;

#[derive(Parser)]
#[command(
    name = "restdsl",
    about = "Swagger 2.0 to REST DSL route generator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a RouteBuilder class from a Swagger spec
    Generate {
        /// Path to the Swagger spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Source root to write the class under
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the source instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Print the in-memory REST DSL definition for a Swagger spec
    Inspect {
        /// Path to the Swagger spec file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new restdsl configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            stdout,
        } => cmd_generate(input, output, stdout),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "restdsl", &mut io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn load_project_config() -> Result<RestDslConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path)?;
    Ok(cfg.unwrap_or_default())
}

fn load_spec(path: &Path) -> Result<Swagger> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let spec = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };
    Ok(spec)
}

/// Apply the project config to a fresh generator for `spec`.
fn build_generator<'a>(
    spec: &'a Swagger,
    cfg: &RestDslConfig,
) -> Result<RestDslSourceGenerator<'a>> {
    let mut generator = RestDslSourceGenerator::new(spec).with_indent(&cfg.indent);

    if let Some(ref name) = cfg.package_name {
        generator = generator.with_package_name(name)?;
    }
    if let Some(ref name) = cfg.class_name {
        generator = generator.with_class_name(name)?;
    }

    match cfg.destination.strategy {
        DestinationStrategy::Direct => {}
        DestinationStrategy::Fixed => {
            let uri = cfg
                .destination
                .uri
                .clone()
                .filter(|uri| !uri.trim().is_empty())
                .context("destination.uri is required by the fixed destination strategy")?;
            generator = generator.with_destination_generator(move |_| uri.clone());
        }
    }

    Ok(generator)
}

fn cmd_generate(input: Option<PathBuf>, output: Option<PathBuf>, stdout: bool) -> Result<()> {
    let cfg = load_project_config()?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let spec = load_spec(&input)?;
    let mut generator = build_generator(&spec, &cfg)?;

    if stdout {
        let mut out = io::stdout().lock();
        generator
            .to_writer(&mut out)
            .context("failed to write generated source")?;
        return Ok(());
    }

    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    eprintln!(
        "Generating {} → {}",
        generator.qualified_name(),
        output_dir.display()
    );
    let path = generator
        .to_directory(&output_dir)
        .with_context(|| format!("failed to generate into {}", output_dir.display()))?;
    eprintln!("  wrote {}", path.display());
    Ok(())
}

fn cmd_inspect(input: Option<PathBuf>, format: InspectFormat) -> Result<()> {
    let cfg = load_project_config()?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let spec = load_spec(&input)?;
    let definition = build_generator(&spec, &cfg)?.to_definition()?;

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&definition)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&definition)?;
            println!("{}", json);
        }
    }

    log::debug!("inspected {} routes", definition.verb_count());
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
