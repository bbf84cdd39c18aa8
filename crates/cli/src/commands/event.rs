use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use serde::de::DeserializeOwned;

use postcord_adapters::{AdapterRegistry, AllAvailable, Bridge, Event, Outcome};

use crate::OutputFormat;
use crate::services::Options;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum EventKind {
    Post,
    Product,
    Order,
    Cf7,
    Gf,
    Jetpack,
}

#[derive(Args, Debug)]
pub struct EventArgs {
    /// Kind of event the file describes.
    pub kind: EventKind,
    /// JSON file holding the event data.
    pub file: PathBuf,
}

fn parse<T: DeserializeOwned>(raw: &str) -> serde_json::Result<T> {
    serde_json::from_str(raw)
}

pub fn read_event(kind: EventKind, raw: &str) -> serde_json::Result<Event> {
    Ok(match kind {
        EventKind::Post => Event::PostPublished(parse(raw)?),
        EventKind::Product => Event::ProductSaved(parse(raw)?),
        EventKind::Order => Event::OrderCreated(parse(raw)?),
        EventKind::Cf7 => Event::ContactForm7Submitted(parse(raw)?),
        EventKind::Gf => Event::GravityFormsEntryCreated(parse(raw)?),
        EventKind::Jetpack => Event::JetpackFormSubmitted(parse(raw)?),
    })
}

pub async fn run(options: &Options, args: &EventArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let event = read_event(args.kind, &raw)
        .with_context(|| format!("invalid {:?} event in {}", args.kind, args.file.display()))?;

    let services = options.services()?;
    let registry = AdapterRegistry::from_settings(&services.settings.integrations, &AllAvailable);
    let bridge = Bridge::new(registry, services);

    let outcome = bridge.handle(&event).await;
    match format {
        OutputFormat::Json => {
            let value = match &outcome {
                Outcome::Sent(response) => serde_json::json!({ "sent": true, "response": response }),
                Outcome::Skipped(reason) => {
                    serde_json::json!({ "sent": false, "skipped": reason.to_string() })
                }
                Outcome::Failed(e) => serde_json::json!({ "sent": false, "error": e.to_string() }),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => match &outcome {
            Outcome::Sent(response) => println!("Sent (HTTP {}).", response.status),
            Outcome::Skipped(reason) => println!("Not sent: {reason}."),
            Outcome::Failed(e) => println!("Delivery failed: {e}."),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_form_submission() {
        let event = read_event(
            EventKind::Cf7,
            r#"{"form_title":"Contact","fields":[{"name":"email","value":"a@b.test"}]}"#,
        )
        .unwrap();
        assert_eq!(event.name(), "contact_form7_submitted");
    }

    #[test]
    fn rejects_mismatched_kind() {
        assert!(read_event(EventKind::Order, r#"{"form_title":"x","fields":[]}"#).is_err());
    }
}
