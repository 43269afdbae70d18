//! Style configuration loading for the CLI.
//!
//! Looks for a TOML file describing the [`CodeStyle`] the formatter should
//! use, either at an explicitly given path or at `htsl.toml` next to the
//! working directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use thiserror::Error;

use htsl::{CodeStyle, HtslError};

/// Configuration-related errors for the CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for HtslError {
    fn from(err: ConfigError) -> Self {
        HtslError::Io(std::io::Error::other(err.to_string()))
    }
}

/// Find and load the code style.
///
/// Search order:
/// 1. Explicit path if provided (an error if it does not exist)
/// 2. `htsl.toml` in the working directory
/// 3. The default style if neither is found
pub fn load_style(explicit_path: Option<impl AsRef<Path>>) -> Result<CodeStyle, HtslError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading style from explicit path");
        return load_style_file(path);
    }

    let local_config = Path::new("htsl.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading style from local path");
        return load_style_file(local_config);
    }

    debug!("No style file found, using the default style");
    Ok(CodeStyle::default())
}

fn load_style_file(path: impl AsRef<Path>) -> Result<CodeStyle, HtslError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let style: CodeStyle =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(style)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn explicit_missing_path_is_an_error() {
        let result = load_style(Some("/definitely/not/here.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn partial_style_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "indent = \"  \"").unwrap();

        let style = load_style(Some(file.path())).unwrap();
        assert_eq!(style.indent(1), "  ");
        assert!(style.trailing_newline());
    }

    #[test]
    fn bad_toml_reports_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "indent = 4").unwrap();

        let err = load_style(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("TOML"));
    }
}
