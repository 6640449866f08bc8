use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{debug, info};

use recipe_typst::config::{load_config, AppConfig};
use recipe_typst::notation::extract_title;
use recipe_typst::{front_matter, RecipeBook, RenderOutput, TypstCli};

#[derive(Parser, Debug)]
#[command(name = "recipe-typst", version, about = "Parse, format and typeset plain-text recipes")]
struct Cli {
    /// Configuration file (defaults to ./recipe-typst.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a recipe and print it as JSON
    Parse {
        file: PathBuf,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print a recipe in canonical notation
    Fmt {
        file: PathBuf,
        /// Rewrite the file in place instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Render recipes to Typst markup; several files make a cookbook
    Render {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Cookbook cover title
        #[arg(long)]
        title: Option<String>,
        /// Cookbook cover subtitle
        #[arg(long)]
        subtitle: Option<String>,
        /// Cookbook owner, used for the default title "<owner>'s Cookbook"
        #[arg(long)]
        owner: Option<String>,
        /// Heading level of a standalone recipe title
        #[arg(long)]
        heading_level: Option<u8>,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Compile to PDF with the configured typst command
        #[arg(long)]
        pdf: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    debug!("{:#?}", config);

    match cli.command {
        Command::Parse { file, pretty } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let (document, _) = recipe_typst::parse_recipe_file(&text)?;
            let json = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            println!("{}", json);
        }
        Command::Fmt { file, write } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let formatted = recipe_typst::format_recipe_file(&text)?;
            if write {
                tokio::fs::write(&file, formatted).await?;
                info!("Formatted {}", file.display());
            } else {
                print!("{}", formatted);
            }
        }
        Command::Render {
            files,
            title,
            subtitle,
            owner,
            heading_level,
            output,
            pdf,
        } => {
            render(
                &config,
                RenderArgs {
                    files,
                    title,
                    subtitle,
                    owner,
                    heading_level,
                    output,
                    pdf,
                },
            )
            .await?;
        }
    }

    Ok(())
}

struct RenderArgs {
    files: Vec<PathBuf>,
    title: Option<String>,
    subtitle: Option<String>,
    owner: Option<String>,
    heading_level: Option<u8>,
    output: Option<PathBuf>,
    pdf: bool,
}

async fn render(config: &AppConfig, args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = RecipeBook::builder()
        .heading_level(args.heading_level.unwrap_or(config.render.heading_level));

    if let Some(title) = args.title.or_else(|| config.cookbook.title.clone()) {
        builder = builder.title(title);
    }
    if let Some(subtitle) = args.subtitle.or_else(|| config.cookbook.subtitle.clone()) {
        builder = builder.subtitle(subtitle);
    }
    if let Some(owner) = args.owner.or_else(|| config.cookbook.owner.clone()) {
        builder = builder.owner(owner);
    }

    let mut first_title = None;
    for file in &args.files {
        let text = tokio::fs::read_to_string(file).await?;
        let (metadata, body) = front_matter::split(&text)?;
        if first_title.is_none() {
            first_title = metadata
                .title
                .clone()
                .or_else(|| extract_title(body))
                .or_else(|| file.file_stem().map(|stem| stem.to_string_lossy().into_owned()));
        }
        builder = builder.recipe(body, metadata);
    }

    if args.pdf {
        builder = builder.pdf(TypstCli::new(&config.compiler));
    }

    match builder.build().await? {
        RenderOutput::Markup(markup) => match &args.output {
            Some(path) => write_output(path, markup.as_bytes()).await?,
            None => println!("{}", markup),
        },
        RenderOutput::Pdf(bytes) => {
            let path = match args.output {
                Some(path) => path,
                None => {
                    let name = if args.files.len() == 1 {
                        first_title.unwrap_or_default()
                    } else {
                        "cookbook".to_string()
                    };
                    PathBuf::from(format!("{}.pdf", parameterize(&name, "recipe")))
                }
            };
            write_output(&path, &bytes).await?;
        }
    }

    Ok(())
}

async fn write_output(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(path, bytes).await?;
    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Lowercase, dash-separated file name; `fallback` when nothing usable remains
fn parameterize(name: &str, fallback: &str) -> String {
    let slug = name
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<&str>>()
        .join("-");
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}
