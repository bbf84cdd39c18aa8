use clap::Args;

use postcord_core::{EmbedContent, EmbedField, ItemId};
use postcord_discord::Dispatcher;

use crate::OutputFormat;
use crate::services::Options;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Message text.
    #[arg(default_value = "")]
    pub content: String,
    /// Context slug used for webhook resolution and hooks.
    #[arg(long, default_value = "")]
    pub context: String,
    /// Item to mark as sent on success (0 for none).
    #[arg(long, default_value_t = 0)]
    pub item: u64,
    /// Webhook URL, overriding the configured ones.
    #[arg(long)]
    pub webhook_url: Option<String>,
    /// Bot display name for this message.
    #[arg(long)]
    pub username: Option<String>,
    /// Bot avatar URL for this message.
    #[arg(long)]
    pub avatar: Option<String>,
    /// Embed title.
    #[arg(long)]
    pub title: Option<String>,
    /// Embed description.
    #[arg(long)]
    pub description: Option<String>,
    /// Embed link.
    #[arg(long)]
    pub url: Option<String>,
    /// Embed image URL.
    #[arg(long)]
    pub image: Option<String>,
    /// Embed field (NAME=VALUE), repeatable.
    #[arg(long, value_parser = parse_key_val)]
    pub field: Vec<(String, String)>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid NAME=VALUE: no `=` found in `{s}`"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

impl SendArgs {
    fn embed(&self) -> EmbedContent {
        EmbedContent {
            title: self.title.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            timestamp: None,
            image: self.image.clone(),
            author: None,
            fields: self
                .field
                .iter()
                .map(|(name, value)| EmbedField::new(name, value))
                .collect(),
        }
    }
}

pub async fn run(options: &Options, args: &SendArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let services = options.services()?;
    let mut dispatcher = Dispatcher::new(args.context.as_str(), services);
    if let Some(url) = &args.webhook_url {
        dispatcher.set_webhook_url(url);
    }
    if let Some(username) = &args.username {
        dispatcher.set_username(username);
    }
    if let Some(avatar) = &args.avatar {
        dispatcher.set_avatar(avatar);
    }

    let response = dispatcher
        .process(&args.content, &args.embed(), ItemId::new(args.item))
        .await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("Sent (HTTP {}).", response.status);
        }
    }
    Ok(())
}
