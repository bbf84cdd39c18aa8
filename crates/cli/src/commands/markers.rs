use clap::{Args, Subcommand};

use postcord_core::ItemId;

use crate::OutputFormat;
use crate::services::{Options, marker_store};

#[derive(Args, Debug)]
pub struct MarkersArgs {
    #[command(subcommand)]
    pub command: MarkersCommand,
}

#[derive(Subcommand, Debug)]
pub enum MarkersCommand {
    /// Check whether an item has been announced.
    Check {
        /// Item id.
        id: u64,
    },
    /// List announced items.
    List,
}

pub async fn run(options: &Options, args: &MarkersArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let settings = options.settings()?;
    let store = marker_store(&settings.markers)?;

    match &args.command {
        MarkersCommand::Check { id } => {
            let sent = store.is_sent(ItemId::new(*id)).await?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "id": id, "sent": sent }));
                }
                OutputFormat::Text => {
                    if sent {
                        println!("Item {id} has been sent.");
                    } else {
                        println!("Item {id} has not been sent.");
                    }
                }
            }
        }
        MarkersCommand::List => {
            let items = store.sent_items().await?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&items)?);
                }
                OutputFormat::Text => {
                    println!("{} items sent:", items.len());
                    for item in &items {
                        println!("  {item}");
                    }
                }
            }
        }
    }
    Ok(())
}
