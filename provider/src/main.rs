// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # didkey
//!
//! Entry point for the `didkey` binary. Parses CLI arguments, initializes
//! logging, opens the resource store, and runs one lifecycle command.
//!
//! - `mint`   : mint once and print, nothing stored
//! - `create` : mint and store under a name
//! - `apply`  : create, replace on keeper change, or no-op
//! - `read`   : print a stored resource (never re-mints)
//! - `delete` : forget a stored resource
//! - `import` : adopt an existing ID
//! - `list`   : print every stored resource
//! - `version`: print build version information
//!
//! Results go to stdout as JSON; logs go to stderr.

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use didkey_protocol::resource::{DidKeyResource, Plan};
use didkey_protocol::storage::{Keepers, ResourceDb, ResourceState};

use cli::{Commands, DidKeyCli};

fn main() -> Result<()> {
    let cli = DidKeyCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Mint => mint(),
        Commands::Version => {
            print_version();
            Ok(())
        }
        command => {
            let resources = open_resources(&cli.state_dir)?;
            run_resource_command(&resources, command)
        }
    }
}

/// Opens (creating if needed) the on-disk store.
fn open_resources(state_dir: &std::path::Path) -> Result<DidKeyResource> {
    std::fs::create_dir_all(state_dir)
        .with_context(|| format!("failed to create state directory: {}", state_dir.display()))?;
    let db = ResourceDb::open(state_dir)
        .with_context(|| format!("failed to open state store at {}", state_dir.display()))?;
    tracing::debug!(path = %state_dir.display(), resources = db.count(), "state store opened");
    Ok(DidKeyResource::new(db))
}

fn run_resource_command(resources: &DidKeyResource, command: Commands) -> Result<()> {
    match command {
        Commands::Create(args) => {
            let state = resources
                .create(&args.name, to_keepers(args.keepers))
                .with_context(|| format!("failed to create resource '{}'", args.name))?;
            print_json(&ResourceView::new(&args.name, &state, true))
        }
        Commands::Apply(args) => {
            let (plan, state) = resources
                .apply(&args.name, to_keepers(args.keepers))
                .with_context(|| format!("failed to apply resource '{}'", args.name))?;
            // Only a fresh mint prints the secret; otherwise the caller
            // already has it.
            let show_secret = plan != Plan::NoChange;
            print_json(&ApplyView {
                plan: format!("{:?}", plan).to_lowercase(),
                resource: ResourceView::new(&args.name, &state, show_secret),
            })
        }
        Commands::Read(args) => match resources.read(&args.name)? {
            Some(state) => print_json(&ResourceView::new(&args.name, &state, args.secret.show_secret)),
            None => bail!("resource '{}' not found", args.name),
        },
        Commands::Delete(args) => {
            let removed = resources.delete(&args.name)?;
            print_json(&serde_json::json!({ "name": args.name, "removed": removed }))
        }
        Commands::Import(args) => {
            let state = resources
                .import(&args.name, &args.id)
                .with_context(|| format!("failed to import resource '{}'", args.name))?;
            print_json(&ResourceView::new(&args.name, &state, false))
        }
        Commands::List(args) => {
            let all = resources.db().list()?;
            let views: Vec<ResourceView<'_>> = all
                .iter()
                .map(|(name, state)| ResourceView::new(name, state, args.show_secret))
                .collect();
            print_json(&views)
        }
        Commands::Mint | Commands::Version => bail!("command does not use the state store"),
    }
}

/// Stateless mint: print the three values and keep nothing.
fn mint() -> Result<()> {
    let minted = didkey_protocol::mint_did_key().context("failed to mint did:key")?;
    print_json(&serde_json::json!({
        "id": minted.id,
        "public_did": minted.did.to_string(),
        "secret_seed_multibase": minted.secret_seed.expose(),
    }))
}

fn to_keepers(pairs: Vec<(String, String)>) -> Keepers {
    pairs.into_iter().collect()
}

/// JSON shape of one resource on stdout.
#[derive(Serialize)]
struct ResourceView<'a> {
    name: &'a str,
    #[serde(flatten)]
    state: ResourceState,
}

impl<'a> ResourceView<'a> {
    fn new(name: &'a str, state: &ResourceState, show_secret: bool) -> Self {
        let state = if show_secret {
            state.clone()
        } else {
            state.redacted()
        };
        Self { name, state }
    }
}

#[derive(Serialize)]
struct ApplyView<'a> {
    plan: String,
    #[serde(flatten)]
    resource: ResourceView<'a>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", out);
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("didkey {}", env!("CARGO_PKG_VERSION"));
    println!("rustc  {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
