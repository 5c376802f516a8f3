//! Media storage backends

pub mod local;

pub use local::LocalMediaStorage;
