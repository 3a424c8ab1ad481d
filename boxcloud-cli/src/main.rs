use anyhow::Context as _;
use boxcloud::{
    webhooks::{TargetReq, TargetType},
    Client,
};
use clap::{Parser, Subcommand};
use serde::Serialize;

mod config;

/// Poke at the Box API from the command line.
///
/// Reads `BOX_ACCESS_TOKEN` and `BOX_BASE_URL` from the environment or a
/// `.env` file.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the user the token belongs to.
    Me,
    /// Show a user.
    User { id: String },
    /// List the users of the enterprise.
    Users,
    /// List the group memberships of a user.
    Memberships { id: String },
    /// List the email aliases of a user.
    Aliases { id: String },
    /// Add an email alias to a user.
    AddAlias { id: String, email: String },
    /// Remove an email alias from a user.
    DeleteAlias { id: String, alias_id: String },
    /// Delete a user.
    DeleteUser { id: String },
    /// List webhooks.
    Webhooks,
    /// Create a webhook on a file or folder.
    CreateWebhook {
        target_id: String,
        target_type: TargetType,
        address: String,
        #[arg(required = true)]
        triggers: Vec<String>,
    },
    /// Delete a webhook.
    DeleteWebhook { id: String },
}

fn print(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = config::Settings::from_env()?;
    let client = Client::new(settings.to_config()?).context("failed to create client")?;

    match cli.command {
        Command::Me => print(&client.me().await?),
        Command::User { id } => print(&client.user(&id).await?),
        Command::Users => print(&client.enterprise_users().await?),
        Command::Memberships { id } => print(&client.memberships(&id).await?),
        Command::Aliases { id } => print(&client.email_aliases(&id).await?),
        Command::AddAlias { id, email } => print(&client.add_email_alias(&id, &email).await?),
        Command::DeleteAlias { id, alias_id } => {
            let deleted = client.delete_email_alias(&id, &alias_id).await?;
            println!("deleted: {deleted}");
            Ok(())
        }
        Command::DeleteUser { id } => {
            println!("{}", client.delete_user(&id).await?);
            Ok(())
        }
        Command::Webhooks => print(&client.webhooks().await?),
        Command::CreateWebhook {
            target_id,
            target_type,
            address,
            triggers,
        } => {
            let target = TargetReq {
                id: &target_id,
                typ: target_type,
            };
            let triggers: Vec<&str> = triggers.iter().map(String::as_str).collect();

            print(&client.create_webhook(target, &address, &triggers).await?)
        }
        Command::DeleteWebhook { id } => {
            println!("{}", client.delete_webhook(&id).await?);
            Ok(())
        }
    }
}
