mod store;

pub use store::FileMarkerStore;
