pub mod api;
pub mod config;
pub mod domain;
pub mod sdc;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::ClientConfig;

pub use api::{HttpApiClient, StoragePool, VolumeQuery};
pub use domain::{MappedVolume, Volume, VolumeParam};
pub use sdc::local_volume_map;
pub use utils::error::{Result, SioError};
