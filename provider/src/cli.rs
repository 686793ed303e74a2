//! # CLI Interface
//!
//! Defines the command-line argument structure for `didkey` using `clap`
//! derive. Global options configure the state directory and logging; the
//! subcommands map one-to-one onto the resource lifecycle.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Mint and manage did:key identifiers.
#[derive(Parser, Debug)]
#[command(
    name = "didkey",
    about = "Mint and manage did:key identifiers",
    version,
    propagate_version = true
)]
pub struct DidKeyCli {
    /// Directory holding the resource state store.
    #[arg(long, short = 's', global = true, env = "DIDKEY_STATE_DIR", default_value = ".didkey")]
    pub state_dir: PathBuf,

    /// Log output format.
    #[arg(long, global = true, env = "DIDKEY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "DIDKEY_LOG_LEVEL", default_value = "didkey=info,didkey_protocol=info")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mint a did:key without storing anything, and print it as JSON.
    Mint,
    /// Mint a new identifier and store it under a name.
    Create(KeepersArgs),
    /// Create the resource, re-mint it if its keepers changed, or leave it.
    Apply(KeepersArgs),
    /// Print a stored resource.
    Read(ReadArgs),
    /// Forget a stored resource.
    Delete(NameArgs),
    /// Adopt an externally known ID under a name, without key material.
    Import(ImportArgs),
    /// Print every stored resource.
    List(ShowSecretArgs),
    /// Print version information and exit.
    Version,
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Resource name.
    pub name: String,
}

#[derive(Args, Debug)]
pub struct KeepersArgs {
    /// Resource name.
    pub name: String,

    /// Keeper entry as KEY=VALUE. Changing any keeper forces a re-mint on
    /// `apply`. May be repeated.
    #[arg(long = "keeper", short = 'k', value_parser = parse_keeper)]
    pub keepers: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Resource name.
    pub name: String,

    #[command(flatten)]
    pub secret: ShowSecretArgs,
}

#[derive(Args, Debug)]
pub struct ShowSecretArgs {
    /// Include the secret seed record in the output.
    #[arg(long)]
    pub show_secret: bool,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Resource name.
    pub name: String,

    /// The existing ID, taken as-is.
    pub id: String,
}

/// Parse a `KEY=VALUE` keeper. The key must be non-empty; the value may be.
pub fn parse_keeper(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid keeper '{}': expected KEY=VALUE", s))?;
    if key.is_empty() {
        return Err(format!("invalid keeper '{}': empty key", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        DidKeyCli::command().debug_assert();
    }

    #[test]
    fn keeper_parsing() {
        assert_eq!(
            parse_keeper("env=prod").unwrap(),
            ("env".to_string(), "prod".to_string())
        );
        assert_eq!(
            parse_keeper("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_keeper("empty=").unwrap().1, "");
        assert!(parse_keeper("novalue").is_err());
        assert!(parse_keeper("=x").is_err());
    }

    #[test]
    fn apply_collects_repeated_keepers() {
        let cli = DidKeyCli::try_parse_from([
            "didkey", "apply", "svc", "-k", "a=1", "--keeper", "b=2",
        ])
        .unwrap();
        match cli.command {
            Commands::Apply(args) => {
                assert_eq!(args.name, "svc");
                assert_eq!(args.keepers.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = DidKeyCli::try_parse_from([
            "didkey",
            "read",
            "svc",
            "--show-secret",
            "--log-format",
            "json",
            "--state-dir",
            "/tmp/x",
        ])
        .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.state_dir, PathBuf::from("/tmp/x"));
        assert!(matches!(cli.command, Commands::Read(ReadArgs { secret: ShowSecretArgs { show_secret: true }, .. })));
    }
}
