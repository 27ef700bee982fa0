pub mod model;
pub mod ports;

pub use model::{link_for, Link, MappedVolume, StoragePoolRecord, Volume, VolumeCreateResp, VolumeParam};
pub use ports::{ApiClient, DriverConfig};
