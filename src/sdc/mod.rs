pub mod mapping;

pub use mapping::{local_volume_map, local_volume_map_with, DrvCfg};
