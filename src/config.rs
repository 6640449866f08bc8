use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::render::DEFAULT_HEADING_LEVEL;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Cookbook cover defaults
    #[serde(default)]
    pub cookbook: CookbookConfig,
    /// Rendering options
    #[serde(default)]
    pub render: RenderConfig,
    /// External document compiler
    #[serde(default)]
    pub compiler: CompilerConfig,
}

/// Defaults for the cookbook cover page
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CookbookConfig {
    /// Whose cookbook this is; used for the fallback title "<owner>'s Cookbook"
    pub owner: Option<String>,
    /// Cover title (overrides the fallback title)
    pub title: Option<String>,
    /// Cover subtitle, omitted when blank
    pub subtitle: Option<String>,
}

/// Options for rendering a standalone recipe
#[derive(Debug, Deserialize, Clone)]
pub struct RenderConfig {
    /// Heading level of a standalone recipe title
    #[serde(default = "default_heading_level")]
    pub heading_level: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            heading_level: default_heading_level(),
        }
    }
}

/// Command used to turn markup into a PDF
#[derive(Debug, Deserialize, Clone)]
pub struct CompilerConfig {
    /// Executable to run
    #[serde(default = "default_compiler_command")]
    pub command: String,
    /// Arguments; the command must read markup on stdin and write the PDF to stdout
    #[serde(default = "default_compiler_args")]
    pub args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command: default_compiler_command(),
            args: default_compiler_args(),
        }
    }
}

// Default value functions
fn default_heading_level() -> u8 {
    DEFAULT_HEADING_LEVEL
}

fn default_compiler_command() -> String {
    "typst".to_string()
}

fn default_compiler_args() -> Vec<String> {
    ["compile", "--format", "pdf", "-", "-"]
        .iter()
        .map(|arg| arg.to_string())
        .collect()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_TYPST__ prefix
    /// 2. recipe-typst.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_TYPST__COOKBOOK__OWNER
    pub fn load() -> Result<Self, ConfigError> {
        load_config(None)
    }

    /// Same as [`AppConfig::load`], reading the given file instead of `recipe-typst.toml`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        load_config(Some(path))
    }
}

/// Load configuration from an optional file and environment variables.
///
/// An explicit `path` must exist; the default `recipe-typst.toml` may be missing.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("recipe-typst").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        // Use double underscore for nested: RECIPE_TYPST__COMPILER__COMMAND
        .add_source(
            Environment::with_prefix("RECIPE_TYPST")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
