pub mod event;
pub mod markers;
pub mod resolve;
pub mod send;
