// src/bin/credvault.rs
//! credvault: command-line front end for the credential vault
//!
//! This is the only place that decides to stop the process: fatal store
//! errors (connection failure, rejected raw query) end here with exit code 1.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use credential_vault::config::Config;
use credential_vault::{
    export_to_json, import_from_json, load_config, logging, rekey_store, seal, CancelToken,
    Cipher, Credential, CredentialStore, CredentialUpdate, MasterPassword, PlainText, VaultError,
};
use rpassword::prompt_password;
use rusqlite::types::Value;
use tracing::{error, info};

/// credvault: a local vault for encrypted passwords.
#[derive(Parser, Debug)]
#[command(name = "credvault")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a credential. The password and master password are prompted for.
    Add {
        title: String,
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, default_value = "")]
        email: String,
    },

    /// Show one credential.
    Get {
        id: i64,
        /// Decrypt and print the password (prompts for the master password).
        #[arg(long)]
        reveal: bool,
    },

    /// List credentials, optionally filtered by case-sensitive substrings.
    List {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, default_value = "")]
        email: String,
    },

    /// Change fields of a credential. Omitted fields keep their value.
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Prompt for a new password.
        #[arg(long)]
        password: bool,
    },

    /// Delete one credential.
    Remove { id: i64 },

    /// Delete every credential.
    Clear {
        #[arg(long)]
        yes: bool,
    },

    /// Export all credentials (still encrypted) to a JSON file.
    Export { file: PathBuf },

    /// Import credentials from a JSON file, re-encrypting them under this
    /// vault's master password.
    Import { file: PathBuf },

    /// Change the master password of every stored credential.
    Rekey,

    /// Run a raw SQL statement against the vault database.
    Sql { query: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging.filter);

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<VaultError>() {
                Some(vault_err) if vault_err.is_fatal() => {
                    error!(error = %vault_err, "fatal vault error");
                    eprintln!("Error: {err:#}");
                    eprintln!("Exiting!");
                }
                _ => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &Config) -> Result<()> {
    let params = config.connect_params()?;
    let mut store = CredentialStore::open(&params)?;
    let cipher = config.cipher();
    let cancel = CancelToken::new();

    match command {
        Commands::Add {
            title,
            username,
            email,
        } => {
            let master = prompt_master("Master password: ")?;
            let plaintext = PlainText::new(prompt_password("Password to store: ")?.into_bytes());
            let secret = seal(&cipher, &master, &plaintext)?;
            let id = store.add_sealed(
                &title,
                Some(username.as_str()),
                Some(email.as_str()),
                &secret,
            )?;
            println!("Added credential {id}");
        }

        Commands::Get { id, reveal } => {
            let Some(cred) = store.get(id)? else {
                println!("No credential with id {id}");
                return Ok(());
            };
            print_credential(&cred);
            if reveal {
                let master = prompt_master("Master password: ")?;
                let plaintext = cipher.decrypt(&master, &cred.encrypted_password, &cred.salt)?;
                println!(
                    "  password: {}",
                    String::from_utf8_lossy(plaintext.expose_secret())
                );
            }
        }

        Commands::List {
            title,
            username,
            email,
        } => {
            let creds = store.filter(&title, &username, &email)?;
            if creds.is_empty() {
                println!("No credentials found.");
            }
            for cred in &creds {
                print_credential(cred);
            }
        }

        Commands::Update {
            id,
            title,
            username,
            email,
            password,
        } => {
            let secret = if password {
                let master = prompt_master("Master password: ")?;
                let plaintext =
                    PlainText::new(prompt_password("New password: ")?.into_bytes());
                Some(seal(&cipher, &master, &plaintext)?)
            } else {
                None
            };
            let update = CredentialUpdate {
                title,
                username,
                email,
                secret,
            };
            if store.update(id, &update)? {
                println!("Updated credential {id}");
            } else {
                println!("No credential with id {id}");
            }
        }

        Commands::Remove { id } => {
            store.remove(id)?;
            println!("Removed credential {id}");
        }

        Commands::Clear { yes } => {
            if !yes {
                bail!("refusing to delete every credential without --yes");
            }
            let removed = store.remove_all()?;
            println!("Removed {removed} credential(s)");
        }

        Commands::Export { file } => {
            let summary = export_to_json(&store, &file, &cancel)?;
            match summary.blake3 {
                Some(digest) => println!(
                    "Exported {} credential(s) → {} (blake3 {digest})",
                    summary.count,
                    file.display()
                ),
                None => println!("No passwords to export."),
            }
        }

        Commands::Import { file } => {
            let old_master = prompt_master("Master password for file: ")?;
            let new_master = prompt_master("Master password for this vault: ")?;
            let report =
                import_from_json(&store, &cipher, &old_master, &new_master, &file, &cancel)
                    .with_context(|| format!("importing {}", file.display()))?;

            if report.total == 0 {
                println!("There are no credentials in the file.");
            }
            for failure in &report.failures {
                println!(
                    "  skipped #{} ({}): {}",
                    failure.index, failure.title, failure.error
                );
            }
            if report.is_complete() && report.total > 0 {
                println!("All credentials have been successfully added!");
            } else if report.total > 0 {
                println!(
                    "Imported {} of {} credential(s)",
                    report.imported, report.total
                );
            }
        }

        Commands::Rekey => {
            let old_master = prompt_master("Current master password: ")?;
            let new_master = prompt_master("New master password: ")?;
            let confirm = prompt_master("Repeat new master password: ")?;
            if new_master.expose_secret() != confirm.expose_secret() {
                bail!("new master passwords do not match");
            }
            let count = rekey_store(&mut store, &cipher, &old_master, &new_master, &cancel)?;
            info!(count, "rekey complete");
            println!("Re-encrypted {count} credential(s)");
        }

        Commands::Sql { query } => {
            for row in store.execute_raw(&query)? {
                let cells: Vec<String> = row.iter().map(format_value).collect();
                println!("{}", cells.join(" | "));
            }
        }
    }

    Ok(())
}

fn prompt_master(prompt: &str) -> Result<MasterPassword> {
    let input = prompt_password(prompt)?;
    if input.is_empty() {
        bail!("master password cannot be empty");
    }
    Ok(MasterPassword::new(input))
}

fn print_credential(cred: &Credential) {
    println!(
        "[{}] {}  user: {}  email: {}",
        cred.id,
        cred.title,
        cred.username.as_deref().unwrap_or("-"),
        cred.email.as_deref().unwrap_or("-"),
    );
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_owned(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(t) => t.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
