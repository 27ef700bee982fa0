use serde::{Deserialize, Serialize};

/// A volume the local SDC agent reports as attached to this host.
///
/// Composite key is `(mdm_id, volume_id)`; `device` stays `None` until the
/// device-identifier directory yields a path for that key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedVolume {
    pub mdm_id: String,
    pub volume_id: String,
    pub device: Option<String>,
}

impl MappedVolume {
    pub fn new(mdm_id: impl Into<String>, volume_id: impl Into<String>) -> Self {
        Self {
            mdm_id: mdm_id.into(),
            volume_id: volume_id.into(),
            device: None,
        }
    }

    /// `<mdm-id>-<volume-id>`，與 /dev/disk/by-id 連結名尾段相同
    pub fn composite_key(&self) -> String {
        format!("{}-{}", self.mdm_id, self.volume_id)
    }
}

/// Hyperlink relation as returned inside array resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

/// Find the link carrying a given relation, if any.
pub fn link_for<'a>(links: &'a [Link], rel: &str) -> Option<&'a Link> {
    links.iter().find(|l| l.rel == rel)
}

/// Volume record as the array returns it. The schema is owned by the array
/// API; unknown fields are ignored and absent ones default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Volume {
    pub id: String,
    pub name: String,
    pub size_in_kb: u64,
    pub volume_type: String,
    pub storage_pool_id: String,
    pub mapping_to_all_sdcs_enabled: bool,
    pub links: Vec<Link>,
}

/// Request body for volume creation. The array expects the size as a
/// decimal string, not a number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeParam {
    pub name: String,
    pub volume_size_in_kb: String,
    pub volume_type: String,
    pub storage_pool_id: String,
    pub protection_domain_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeCreateResp {
    pub id: String,
}

/// Storage pool resource representation, as fetched from the array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoragePoolRecord {
    pub id: String,
    pub name: String,
    pub protection_domain_id: String,
    pub links: Vec<Link>,
}
