//! Delivery boundary for Postcord.
//!
//! The dispatcher decides *what* to send and hands an [`OutboundRequest`] to
//! a [`Transport`], which decides *how*. Keeping the two apart lets the
//! formatting and eligibility logic be tested without a network.

pub mod error;
pub mod log;
pub mod transport;

pub use error::TransportError;
pub use log::LogTransport;
pub use transport::{DeliveryResult, DynTransport, OutboundRequest, Transport, TransportResponse};
