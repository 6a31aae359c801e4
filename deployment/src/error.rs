use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("invalid deployment record: {0}")]
    Json(#[from] serde_json::Error),

    /// Every unset and every malformed field, reported in one go.
    #[error("invalid configuration: {}", summarize(missing, malformed))]
    Invalid {
        missing: Vec<&'static str>,
        malformed: Vec<(&'static str, String)>,
    },

    #[error("invalid address for {field}: {value}")]
    InvalidAddress { field: &'static str, value: String },
}

fn summarize(missing: &[&'static str], malformed: &[(&'static str, String)]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing {}", missing.join(", ")));
    }
    if !malformed.is_empty() {
        let fields: Vec<String> = malformed
            .iter()
            .map(|(field, value)| format!("{field}={value}"))
            .collect();
        parts.push(format!("malformed {}", fields.join(", ")));
    }
    parts.join("; ")
}
