use clap::Args;

use postcord_core::sanitize::redact_url;
use postcord_core::{Context, NoopHooks};
use postcord_discord::resolve_webhook_url;

use crate::services::Options;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Context slug to resolve.
    #[arg(long, default_value = "")]
    pub context: String,
    /// Explicit webhook URL, as a caller would set it.
    #[arg(long)]
    pub webhook_url: Option<String>,
    /// Print the full URL, including its secret path.
    #[arg(long)]
    pub show_secret: bool,
}

pub fn run(options: &Options, args: &ResolveArgs) -> anyhow::Result<()> {
    let settings = options.settings()?;
    let context = Context::new(&args.context);
    let url = resolve_webhook_url(
        &context,
        args.webhook_url.as_deref().unwrap_or_default(),
        &settings,
        &NoopHooks,
    );

    if url.is_empty() {
        eprintln!("No webhook URL configured for context '{context}'.");
        std::process::exit(1);
    }
    if args.show_secret {
        println!("{url}");
    } else {
        println!("{}", redact_url(&url));
    }
    Ok(())
}
