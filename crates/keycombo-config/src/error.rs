use keycombo::ComboError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to parse KDL")]
    #[diagnostic(code(keycombo::config::parse_error))]
    ParseError {
        #[source_code]
        src: String,
        #[label("here")]
        span: miette::SourceSpan,
        #[source]
        source: kdl::KdlError,
    },

    #[error("Invalid combo '{name}': {source}")]
    #[diagnostic(code(keycombo::config::invalid_combo))]
    InvalidCombo {
        name: String,
        #[source_code]
        src: String,
        #[label("here")]
        span: miette::SourceSpan,
        #[source]
        source: ComboError,
    },

    #[error("Combo '{name}' is defined more than once")]
    #[diagnostic(
        code(keycombo::config::duplicate_combo),
        help("combo names must be unique")
    )]
    DuplicateCombo {
        name: String,
        #[source_code]
        src: String,
        #[label("redefined here")]
        span: miette::SourceSpan,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(keycombo::config::invalid))]
    Invalid { message: String },

    #[error("Missing required field: {field}")]
    #[diagnostic(code(keycombo::config::missing_field))]
    MissingField { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
