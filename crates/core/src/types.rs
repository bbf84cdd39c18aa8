use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sanitize::sanitize_key;

/// Identifier of a content item (post, product) in the host system.
///
/// Ids of `0` denote "no trackable item": dispatches for them never record a
/// sent marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// The "no item" id.
    pub const NONE: Self = Self(0);

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether a sent marker may be attached to this id.
    #[must_use]
    pub const fn is_trackable(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Short slug naming the integration that produces a dispatch
/// (`post`, `product`, `order`, `cf7`, ...).
///
/// The slug is always sanitized to lower-case alphanumerics, underscores
/// and hyphens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Context(String);

impl Context {
    /// Create a context from raw input, sanitizing it.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(sanitize_key(raw.as_ref()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Context {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Context {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Context> for String {
    fn from(c: Context) -> Self {
        c.0
    }
}

impl AsRef<str> for Context {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Content types that carry a message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Post,
    Product,
    Order,
}

impl ContentKind {
    /// The context slug dispatches of this kind are sent under.
    #[must_use]
    pub fn context(self) -> Context {
        Context(self.as_str().to_owned())
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Product => "product",
            Self::Order => "order",
        }
    }

    /// Built-in template used when the configured one renders empty.
    #[must_use]
    pub fn default_template(self) -> &'static str {
        match self {
            Self::Post => "%author% just published the %post_type% %title% on their blog: %url%",
            Self::Product => "A new product is available in our store. Check it out!",
            Self::Order => {
                "Order #%order_number% by %order_customer% has been created. The order total is %order_total%."
            }
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
