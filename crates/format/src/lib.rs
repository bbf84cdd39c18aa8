//! Formatter for Postcord: turns domain data into a message string and an
//! optional rich embed.
//!
//! Everything here is pure. The only inputs besides the arguments are the
//! [`Settings`](postcord_core::Settings) a [`Formatter`] is built with and,
//! for embed timestamps, the current time passed in by the caller.

pub mod embed;
pub mod entities;
pub mod excerpt;
pub mod formatter;
pub mod mention;
pub mod template;

pub use embed::{Embed, EmbedAuthor, EmbedFooter, EmbedImage, WireField, build_embed};
pub use entities::decode_entities;
pub use excerpt::{excerpt, strip_shortcodes, trim_words};
pub use formatter::Formatter;
pub use mention::apply_mention_everyone;
pub use template::{Placeholders, render_template, substitute};
