//! Form plugin adapters. Submissions are reported as embed fields with no
//! message text and never carry a sent marker.

use std::sync::LazyLock;

use regex::Regex;

use postcord_core::sanitize::strip_tags;
use postcord_core::{Context, EmbedContent, EmbedField, ItemId};

use crate::adapter::{Adapter, Decision, PrepareContext, SkipReason};
use crate::capability::Integration;
use crate::event::Event;

/// Jetpack numbers its keys, e.g. `1_Name`, `2_Email`.
static JETPACK_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+_").expect("valid jetpack prefix regex"));

fn finish(cx: &PrepareContext<'_>, context: Context, fields: Vec<EmbedField>) -> Decision {
    if fields.is_empty() {
        return Decision::Skip(SkipReason::EmptySubmission);
    }
    let embed = EmbedContent {
        fields,
        ..EmbedContent::default()
    };
    cx.notify(context, String::new(), embed, ItemId::NONE)
}

/// Contact Form 7. Skips internal `_`-prefixed keys and empty values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactForm7Adapter;

impl Adapter for ContactForm7Adapter {
    fn integration(&self) -> Integration {
        Integration::ContactForm7
    }

    fn context(&self) -> Context {
        Context::new("cf7")
    }

    fn prepare(&self, event: &Event, cx: &PrepareContext<'_>) -> Decision {
        let Event::ContactForm7Submitted(submission) = event else {
            return Decision::Skip(SkipReason::NoAdapter(event.name()));
        };
        let fields = submission
            .fields
            .iter()
            .filter(|entry| !entry.name.starts_with('_') && !entry.value.trim().is_empty())
            .map(|entry| EmbedField::new(entry.name.as_str(), entry.value.as_str()))
            .collect();
        finish(cx, self.context(), fields)
    }
}

/// Gravity Forms. Uses field labels and markup-free display values.
#[derive(Debug, Clone, Copy, Default)]
pub struct GravityFormsAdapter;

impl Adapter for GravityFormsAdapter {
    fn integration(&self) -> Integration {
        Integration::GravityForms
    }

    fn context(&self) -> Context {
        Context::new("gf")
    }

    fn prepare(&self, event: &Event, cx: &PrepareContext<'_>) -> Decision {
        let Event::GravityFormsEntryCreated(entry) = event else {
            return Decision::Skip(SkipReason::NoAdapter(event.name()));
        };
        let fields = entry
            .fields
            .iter()
            .map(|field| {
                EmbedField::new(
                    strip_tags(&field.label).trim(),
                    strip_tags(&field.display_value).trim(),
                )
            })
            .collect();
        finish(cx, self.context(), fields)
    }
}

/// Jetpack contact form. Strips numbering prefixes from keys and skips
/// empty values.
#[derive(Debug, Clone, Copy, Default)]
pub struct JetpackFormAdapter;

impl Adapter for JetpackFormAdapter {
    fn integration(&self) -> Integration {
        Integration::JetpackContactForm
    }

    fn context(&self) -> Context {
        Context::new("jetpack")
    }

    fn prepare(&self, event: &Event, cx: &PrepareContext<'_>) -> Decision {
        let Event::JetpackFormSubmitted(submission) = event else {
            return Decision::Skip(SkipReason::NoAdapter(event.name()));
        };
        let fields = submission
            .values
            .iter()
            .filter(|entry| !entry.value.trim().is_empty())
            .map(|entry| {
                EmbedField::new(
                    JETPACK_PREFIX_RE.replace_all(&entry.name, "").into_owned(),
                    entry.value.as_str(),
                )
            })
            .collect();
        finish(cx, self.context(), fields)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use postcord_core::{NoopHooks, Settings};
    use postcord_format::Formatter;

    use super::*;
    use crate::event::{Cf7Submission, FormEntry, GravityField, GravityFormsEntry, JetpackSubmission};

    fn entry(name: &str, value: &str) -> FormEntry {
        FormEntry {
            name: name.into(),
            value: value.into(),
        }
    }

    fn prepare(adapter: &dyn Adapter, event: &Event) -> Decision {
        let formatter = Formatter::new(Arc::new(Settings::default()));
        let cx = PrepareContext {
            formatter: &formatter,
            hooks: &NoopHooks,
            now: Utc::now(),
            already_sent: false,
        };
        adapter.prepare(event, &cx)
    }

    fn field_pairs(decision: &Decision) -> Vec<(String, String)> {
        decision
            .notification()
            .unwrap()
            .embed
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    #[test]
    fn cf7_skips_internal_and_empty() {
        let event = Event::ContactForm7Submitted(Cf7Submission {
            form_title: "Contact".into(),
            fields: vec![
                entry("_wpcf7", "12"),
                entry("your-name", "Jane"),
                entry("your-phone", ""),
                entry("your-message", "Hello!"),
            ],
        });
        let decision = prepare(&ContactForm7Adapter, &event);
        let notification = decision.notification().unwrap();
        assert_eq!(notification.context.as_str(), "cf7");
        assert!(notification.content.is_empty());
        assert_eq!(notification.item, ItemId::NONE);
        assert_eq!(
            field_pairs(&decision),
            [
                ("your-name".to_owned(), "Jane".to_owned()),
                ("your-message".to_owned(), "Hello!".to_owned()),
            ]
        );
    }

    #[test]
    fn gravity_forms_uses_labels_and_strips_markup() {
        let event = Event::GravityFormsEntryCreated(GravityFormsEntry {
            form_title: "Signup".into(),
            fields: vec![
                GravityField {
                    label: "Name".into(),
                    display_value: "Jane Doe".into(),
                },
                GravityField {
                    label: "Website".into(),
                    display_value: "<a href='https://jane.test'>https://jane.test</a>".into(),
                },
            ],
        });
        let decision = prepare(&GravityFormsAdapter, &event);
        assert_eq!(decision.notification().unwrap().context.as_str(), "gf");
        assert_eq!(
            field_pairs(&decision),
            [
                ("Name".to_owned(), "Jane Doe".to_owned()),
                ("Website".to_owned(), "https://jane.test".to_owned()),
            ]
        );
    }

    #[test]
    fn jetpack_strips_number_prefixes() {
        let event = Event::JetpackFormSubmitted(JetpackSubmission {
            post_id: 3,
            values: vec![
                entry("1_Name", "Jane"),
                entry("2_Email", "jane@example.com"),
                entry("3_Website", ""),
            ],
        });
        let decision = prepare(&JetpackFormAdapter, &event);
        assert_eq!(decision.notification().unwrap().context.as_str(), "jetpack");
        assert_eq!(
            field_pairs(&decision),
            [
                ("Name".to_owned(), "Jane".to_owned()),
                ("Email".to_owned(), "jane@example.com".to_owned()),
            ]
        );
    }

    #[test]
    fn empty_submission_is_skipped() {
        let event = Event::ContactForm7Submitted(Cf7Submission {
            form_title: String::new(),
            fields: vec![entry("_wpcf7", "12")],
        });
        assert_eq!(
            prepare(&ContactForm7Adapter, &event),
            Decision::Skip(SkipReason::EmptySubmission)
        );
    }
}
