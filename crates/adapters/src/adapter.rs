use std::fmt;

use chrono::{DateTime, Utc};

use postcord_core::{Context, EmbedContent, Hooks, ItemId, Settings};
use postcord_format::Formatter;

use crate::capability::Integration;
use crate::eligibility::check_new;
use crate::event::Event;

/// Everything an adapter may consult while preparing a notification.
pub struct PrepareContext<'a> {
    pub formatter: &'a Formatter,
    pub hooks: &'a dyn Hooks,
    pub now: DateTime<Utc>,
    /// Whether the event's item already carries a sent marker.
    pub already_sent: bool,
}

impl PrepareContext<'_> {
    pub fn settings(&self) -> &Settings {
        self.formatter.settings()
    }

    /// Run the eligibility check for a content item, then let the
    /// `filter_is_new` hook override it.
    pub fn check_new(
        &self,
        context: &Context,
        item: ItemId,
        created: DateTime<Utc>,
        is_revision: bool,
    ) -> Result<(), SkipReason> {
        let verdict = check_new(created, self.now, self.already_sent, is_revision);
        if self.hooks.filter_is_new(context, item, verdict.is_ok()) {
            Ok(())
        } else {
            Err(verdict.err().unwrap_or(SkipReason::Filtered))
        }
    }

    /// Finish a notification: apply the content and embed filters.
    pub fn notify(
        &self,
        context: Context,
        content: String,
        embed: EmbedContent,
        item: ItemId,
    ) -> Decision {
        let content = self.hooks.filter_content(&context, content);
        let embed = self.hooks.filter_embed(&context, embed);
        Decision::Notify(Notification {
            context,
            content,
            embed,
            item,
        })
    }
}

/// An outbound message, ready to hand to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub context: Context,
    pub content: String,
    pub embed: EmbedContent,
    /// Item to mark as sent on success; [`ItemId::NONE`] for none.
    pub item: ItemId,
}

/// Why an event produced no notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Created in an earlier hour: an update of existing content.
    NotNew,
    /// A sent marker exists for the item.
    AlreadySent,
    /// The item is a revision.
    Revision,
    /// A `filter_is_new` hook rejected the item.
    Filtered,
    /// Order status is not in the allowed list.
    StatusNotAllowed(String),
    /// The submission had no values to report.
    EmptySubmission,
    /// No registered adapter handles the event.
    NoAdapter(&'static str),
    /// The sent marker could not be read.
    MarkerUnavailable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNew => f.write_str("not new"),
            Self::AlreadySent => f.write_str("already sent"),
            Self::Revision => f.write_str("revision"),
            Self::Filtered => f.write_str("rejected by filter"),
            Self::StatusNotAllowed(status) => write!(f, "order status '{status}' not allowed"),
            Self::EmptySubmission => f.write_str("empty submission"),
            Self::NoAdapter(event) => write!(f, "no adapter registered for {event}"),
            Self::MarkerUnavailable => f.write_str("sent marker unavailable"),
        }
    }
}

/// Result of preparing an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Notify(Notification),
    Skip(SkipReason),
}

impl Decision {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Self::Notify(notification) => Some(notification),
            Self::Skip(_) => None,
        }
    }
}

/// One integration's event handling.
///
/// Implementations are pure: no I/O, no clock reads. Everything external
/// comes in through [`PrepareContext`].
pub trait Adapter: Send + Sync {
    /// Integration this adapter serves.
    fn integration(&self) -> Integration;

    /// Context slug its notifications are sent under.
    fn context(&self) -> Context;

    /// Decide whether `event` notifies and prepare the message.
    fn prepare(&self, event: &Event, cx: &PrepareContext<'_>) -> Decision;
}
