//! Core application

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::cli::{self, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{DEFAULT_LOG_FILTER, ENV_LOG};
use crate::filters::FilterCompiler;

pub struct CoreApp {
    pub config: AppConfig,
    pub compiler: FilterCompiler,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::new(AppConfig::load(&cli_config)?);

        match command {
            Commands::Compile { input, with_where } => {
                let text = read_input(input.as_deref())?;
                println!("{}", app.compile_text(&text, with_where)?);
            }
            Commands::Check { input } => {
                let text = read_input(input.as_deref())?;
                app.check_text(&text)?;
                println!("ok");
            }
        }

        Ok(())
    }

    pub fn new(config: AppConfig) -> Self {
        let compiler = FilterCompiler::new(config.limits);
        Self { config, compiler }
    }

    /// Compile filter JSON text into a YQL fragment, optionally prefixed with `where`
    pub fn compile_text(&self, text: &str, with_where: bool) -> Result<String> {
        let yql = self
            .compiler
            .normalize_str(text.trim())
            .context("Failed to compile filter")?;

        if with_where {
            Ok(format!("where {}", yql))
        } else {
            Ok(yql)
        }
    }

    /// Validate filter JSON text; the error carries the stable error code
    pub fn check_text(&self, text: &str) -> Result<()> {
        self.compiler
            .normalize_str(text.trim())
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}: {}", e.code(), e))
    }

    fn init_logging() {
        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        // stdout carries only the compiled fragment
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}

/// Read filter JSON from a file, or stdin when the path is absent or "-"
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            tracing::debug!(path = %path.display(), "Reading filter file");
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read filter file: {}", path.display()))
        }
        _ => {
            tracing::debug!("Reading filter from stdin");
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read filter from stdin")?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use crate::filters::FilterLimits;

    fn app() -> CoreApp {
        CoreApp::new(AppConfig::default())
    }

    #[test]
    fn test_compile_text() {
        let yql = app()
            .compile_text(r#"{"field": "meta.type", "operator": "==", "value": "article"}"#, false)
            .unwrap();
        assert_eq!(yql, r#"type contains "article""#);
    }

    #[test]
    fn test_compile_text_with_where() {
        let yql = app()
            .compile_text("\n{\"field\": \"meta.n\", \"operator\": \">\", \"value\": 1}\n", true)
            .unwrap();
        assert_eq!(yql, "where n > 1");
    }

    #[test]
    fn test_compile_text_error_keeps_message() {
        let err = app()
            .compile_text(r#"{"field": "meta.s", "operator": "in", "value": []}"#, false)
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to compile filter"));
        assert!(message.contains("requires a non-empty list"));
    }

    #[test]
    fn test_check_text() {
        let app = app();
        assert!(app
            .check_text(r#"{"operator": "NOT", "conditions": [{"field": "a", "operator": "==", "value": 1}]}"#)
            .is_ok());

        let err = app.check_text(r#"{"operator": "AND"}"#).unwrap_err();
        assert!(err.to_string().starts_with("MISSING_ATTRIBUTE: "));
    }

    #[test]
    fn test_app_uses_configured_limits() {
        let app = CoreApp::new(AppConfig {
            limits: FilterLimits {
                max_depth: 1,
                ..FilterLimits::default()
            },
        });
        let err = app
            .check_text(r#"{"operator": "AND", "conditions": [{"field": "a", "operator": "==", "value": 1}]}"#)
            .unwrap_err();
        assert!(err.to_string().starts_with("FILTER_TOO_DEEP"));
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"field\": \"a\", \"operator\": \"==\", \"value\": 1}").unwrap();

        let text = read_input(Some(file.path())).unwrap();
        assert!(text.contains("\"field\""));
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/filter.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read filter file"));
    }
}
