use std::io::Write;

use anyhow::Result;

use crate::db::ClientRepository;

/// Phone removed by the demonstration, independent of what was inserted
pub const DEMO_PHONE_ID: i64 = 1;

/// Run the scripted walkthrough: create schema, add a client with two phones,
/// rename it, search, then remove a phone and the client.
pub async fn run<W: Write>(repo: &mut ClientRepository, out: &mut W) -> Result<()> {
    repo.ensure_schema().await?;
    writeln!(out, "Tables created.")?;

    let id = repo
        .add_client("Ivan", "Ivanov", Some("ivan@example.com"))
        .await?;
    writeln!(out, "Client added with ID: {}", id)?;

    repo.add_phone(id, Some("+123456789")).await?;
    writeln!(out, "Phone added.")?;
    repo.add_phone(id, Some("+987654321")).await?;
    writeln!(out, "Phone added.")?;

    repo.update_client(id, "Ivan", "Petrov", Some("ivan.petrov@example.com"))
        .await?;
    writeln!(out, "Client updated.")?;

    writeln!(out)?;
    writeln!(out, "-- Search for 'Ivan' --")?;
    for row in repo.find_clients("Ivan").await? {
        writeln!(out, "{}", row)?;
    }

    repo.delete_phone(DEMO_PHONE_ID).await?;
    writeln!(out, "Phone deleted.")?;

    repo.delete_client(id).await?;
    writeln!(out, "Client deleted.")?;

    Ok(())
}
