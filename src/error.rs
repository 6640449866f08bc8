use thiserror::Error;

/// Content errors raised while reading a recipe file.
///
/// All are user-correctable and meant to be shown next to the offending text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text is empty or only contains blank lines
    #[error("Recipe text cannot be empty")]
    EmptyInput,

    /// The recipe was readable but no step carries an ingredient
    #[error("Recipe must contain at least one ingredient.")]
    MissingIngredients,

    /// The `---` header is not a YAML mapping of metadata
    #[error("Invalid front matter: {0}")]
    InvalidFrontMatter(String),
}

/// Errors that can occur while assembling, rendering or compiling recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// A single recipe could not be parsed
    #[error("Failed to parse recipe: {0}")]
    Parse(#[from] ParseError),

    /// One member of a cookbook could not be parsed; the whole book is abandoned
    #[error("Recipe #{index} could not be parsed: {source}")]
    InvalidMember {
        index: usize,
        #[source]
        source: ParseError,
    },

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// The external document compiler rejected the markup or could not run
    #[error("Compilation failed: {0}")]
    CompileFailed(String),

    /// Reading recipes or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A background parsing task panicked or was cancelled
    #[error("Background task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Serializing a document to JSON failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing front matter failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RecipeError {
    /// The underlying content error, if this failure came from the notation parser
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            RecipeError::Parse(e) => Some(e),
            RecipeError::InvalidMember { source, .. } => Some(source),
            _ => None,
        }
    }
}
