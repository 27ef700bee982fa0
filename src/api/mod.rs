pub mod client;
pub mod volumes;

pub use client::HttpApiClient;
pub use volumes::{StoragePool, VolumeQuery};
