use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::db::ClientRepository;
use crate::demo;

/// Manage client records and their phone numbers
#[derive(Debug, Parser)]
#[command(name = "client_registry", version)]
pub struct Cli {
    /// Database URL, overriding DATABASE_URL
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Run the scripted walkthrough (default)
    Demo,
    /// Create the tables if they are missing
    Init,
    /// Insert a client and print its id
    AddClient {
        first_name: String,
        last_name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Attach a phone number to a client
    AddPhone {
        client_id: i64,
        phone_number: Option<String>,
    },
    /// Overwrite a client's name and email
    UpdateClient {
        client_id: i64,
        first_name: String,
        last_name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Remove a single phone
    DeletePhone { phone_id: i64 },
    /// Remove a client together with its phones
    DeleteClient { client_id: i64 },
    /// Search names, emails and phone numbers
    Find { keyword: String },
    /// Print one client and its phones
    Show { client_id: i64 },
}

impl Cli {
    /// The command to run, falling back to the walkthrough
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Demo)
    }
}

/// Run a single command against the repository, writing result lines to `out`
pub async fn execute<W: Write>(
    command: Command,
    repo: &mut ClientRepository,
    out: &mut W,
) -> Result<()> {
    // The walkthrough creates the schema itself and reports it
    if command != Command::Demo {
        repo.ensure_schema().await?;
    }

    match command {
        Command::Demo => demo::run(repo, out).await?,
        Command::Init => {
            writeln!(out, "Tables created.")?;
        }
        Command::AddClient {
            first_name,
            last_name,
            email,
        } => {
            let id = repo
                .add_client(&first_name, &last_name, email.as_deref())
                .await?;
            writeln!(out, "Client added with ID: {}", id)?;
        }
        Command::AddPhone {
            client_id,
            phone_number,
        } => {
            let id = repo.add_phone(client_id, phone_number.as_deref()).await?;
            writeln!(out, "Phone added with ID: {}", id)?;
        }
        Command::UpdateClient {
            client_id,
            first_name,
            last_name,
            email,
        } => {
            let affected = repo
                .update_client(client_id, &first_name, &last_name, email.as_deref())
                .await?;
            report(out, affected, "Client updated.", "client", client_id)?;
        }
        Command::DeletePhone { phone_id } => {
            let affected = repo.delete_phone(phone_id).await?;
            report(out, affected, "Phone deleted.", "phone", phone_id)?;
        }
        Command::DeleteClient { client_id } => {
            let affected = repo.delete_client(client_id).await?;
            report(out, affected, "Client deleted.", "client", client_id)?;
        }
        Command::Find { keyword } => {
            let rows = repo.find_clients(&keyword).await?;
            if rows.is_empty() {
                writeln!(out, "No clients match '{}'.", keyword)?;
            }
            for row in rows {
                writeln!(out, "{}", row)?;
            }
        }
        Command::Show { client_id } => {
            let client = repo.get_client(client_id).await?;
            writeln!(
                out,
                "ID: {}, Name: {} {}, Email: {}",
                client.id,
                client.first_name,
                client.last_name,
                client.email.as_deref().unwrap_or("")
            )?;
            for phone in repo.list_phones(client_id).await? {
                writeln!(
                    out,
                    "  Phone {}: {}",
                    phone.id,
                    phone.phone_number.as_deref().unwrap_or("")
                )?;
            }
        }
    }

    Ok(())
}

/// Combine a command outcome with the outcome of closing the connection.
///
/// A command failure wins; a close failure is only returned when the command
/// itself succeeded, otherwise it is logged.
pub fn settle(result: Result<()>, closed: crate::error::Result<()>) -> Result<()> {
    match (result, closed) {
        (Err(err), Err(close_err)) => {
            warn!("Failed to close database connection: {}", close_err);
            Err(err)
        }
        (Ok(()), Err(close_err)) => Err(close_err.into()),
        (result, Ok(())) => result,
    }
}

fn report<W: Write>(
    out: &mut W,
    affected: u64,
    done: &str,
    entity: &str,
    id: i64,
) -> Result<()> {
    if affected == 0 {
        writeln!(out, "No {} with ID {}; nothing changed.", entity, id)?;
    } else {
        writeln!(out, "{}", done)?;
    }
    Ok(())
}
