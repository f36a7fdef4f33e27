use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{ApiConfig, Config, ConfigError, Environment};
use crate::logs::parse_date;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Confirm an unsubscribe link and print the result
    Unsubscribe {
        /// Token from the unsubscribe link
        #[arg(long)]
        k: String,
        /// Receiver address
        #[arg(long)]
        to: String,
        /// Sender address
        #[arg(long)]
        from: String,
    },
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Dashboard for email automation send logs", long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/sendlog/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// API environment to talk to
    #[arg(long = "env", value_enum, global = true)]
    pub environment: Option<Environment>,

    /// Use this base URL regardless of environment
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Open the dashboard on this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("invalid date \"{}\", expected YYYY-MM-DD", s))
}

impl Cli {
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
    }

    /// Connection settings after applying `--env` and `--base-url`
    pub fn api_config(&self, config: &Config) -> Result<ApiConfig, ConfigError> {
        let mut settings = config.api.clone();
        if let Some(environment) = self.environment {
            settings.environment = environment;
        }
        if let Some(base_url) = &self.base_url {
            return Ok(ApiConfig {
                base_url: base_url.clone(),
                timeout: Duration::from_secs(settings.timeout_secs),
            });
        }
        settings.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_flags() {
        let cli = Cli::try_parse_from([
            "sendlog",
            "--env",
            "production",
            "--base-url",
            "https://mail.example.com/api/",
            "--date",
            "2025-05-01",
        ])
        .unwrap();
        assert_eq!(cli.environment, Some(Environment::Production));
        assert_eq!(cli.date, parse_date("2025-05-01"));
        assert!(cli.command.is_none());

        let api = cli.api_config(&Config::default()).unwrap();
        assert_eq!(api.base_url, "https://mail.example.com/api/");
        assert_eq!(api.timeout, Duration::from_secs(30));
    }

    #[test]
    fn production_without_url_fails() {
        let cli = Cli::try_parse_from(["sendlog", "--env", "production"]).unwrap();
        assert!(matches!(
            cli.api_config(&Config::default()),
            Err(ConfigError::MissingBaseUrl(Environment::Production))
        ));
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["sendlog", "--date", "06/01/2025"]).is_err());
    }

    #[test]
    fn unsubscribe_subcommand() {
        let cli = Cli::try_parse_from([
            "sendlog",
            "unsubscribe",
            "--k",
            "abc",
            "--to",
            "b@y.io",
            "--from",
            "a@x.io",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Unsubscribe {
                k: "abc".to_string(),
                to: "b@y.io".to_string(),
                from: "a@x.io".to_string(),
            })
        );
    }

    #[test]
    fn config_path_expands_tilde() {
        let cli = Cli::try_parse_from(["sendlog", "--config", "/tmp/sendlog.toml"]).unwrap();
        assert_eq!(cli.config_path(), Some(PathBuf::from("/tmp/sendlog.toml")));
    }
}
