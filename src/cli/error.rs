use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning raw arguments into a command descriptor.
#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("the provided{} input is not a valid path", label_suffix(.label))]
    InvalidPath { label: Option<String> },

    #[error("the provided{} input is not a directory", label_suffix(.label))]
    NotADirectory { label: Option<String> },

    #[error("failed to create directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid target for populating the cache, expected 'local' | 'remote' (got {})", display_value(.value))]
    InvalidTarget { value: Option<String> },

    #[error("invalid command, expected {expected} (got {})", display_value(.value))]
    UnknownCommand {
        value: Option<String>,
        expected: String,
    },

    #[error("invalid cache chunk size '{value}', expected a positive integer")]
    InvalidCacheChunkSize { value: String },
}

fn label_suffix(label: &Option<String>) -> String {
    label
        .as_deref()
        .map(|l| format!(" \"{l}\""))
        .unwrap_or_default()
}

fn display_value(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("'{v}'"),
        None => "nothing".to_string(),
    }
}
