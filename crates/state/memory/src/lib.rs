mod store;

pub use store::MemoryMarkerStore;
