use thiserror::Error;

/// Invalid values in a loaded configuration file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("config value '{field}' must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("config value '{field}' must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("config value 'routing.hitSamples' must be at least 1")]
    ZeroSamples,
}

/// Errors raised while parsing an event script.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: expected {expected}, found '{found}'")]
    BadArguments {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: unknown node kind '{kind}'")]
    UnknownKind { line: usize, kind: String },

    #[error("line {line}: unknown key '{key}'")]
    UnknownKey { line: usize, key: String },
}
