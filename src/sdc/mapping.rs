use crate::domain::model::MappedVolume;
use crate::domain::ports::DriverConfig;
use crate::utils::error::{Result, SioError};
use async_trait::async_trait;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

/// Fixed install path of the SDC device-configuration utility.
pub const DRV_CFG_PATH: &str = "/bin/emc/scaleio/drv_cfg";

/// Directory of by-identifier device symlinks.
pub const DISK_BY_ID_PATH: &str = "/dev/disk/by-id";

const DEVICE_PREFIX: &str = "emc-vol-";
const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// [`DriverConfig`] backed by the real `drv_cfg` binary.
pub struct DrvCfg {
    binary: PathBuf,
    timeout: Duration,
}

impl DrvCfg {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

impl Default for DrvCfg {
    fn default() -> Self {
        Self::new(DRV_CFG_PATH, DEFAULT_QUERY_TIMEOUT)
    }
}

#[async_trait]
impl DriverConfig for DrvCfg {
    async fn query_volumes(&self) -> Result<String> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.binary).arg("--query_vols").output(),
        )
        .await
        .map_err(|_| SioError::QueryVolumesError {
            message: format!(
                "'{}' timed out after {}s",
                self.binary.display(),
                self.timeout.as_secs()
            ),
        })?
        .map_err(|e| SioError::QueryVolumesError {
            message: format!("failed to run '{}': {}", self.binary.display(), e),
        })?;

        if !output.status.success() {
            return Err(SioError::QueryVolumesError {
                message: format!(
                    "'{}' exited with {}: {}",
                    self.binary.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parse `drv_cfg --query_vols` stdout into records keyed by composite key.
///
/// A line is a volume record iff its first whitespace-delimited token is the
/// literal `VOL-ID`; the volume id is token 2 and the MDM id token 4. All
/// other lines (headers, blanks, short lines) are skipped, and a later line
/// with the same key silently overwrites the earlier one.
fn parse_query_vols(output: &str) -> BTreeMap<String, MappedVolume> {
    let mut mapped = BTreeMap::new();

    for line in output.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() != Some(&"VOL-ID") {
            continue;
        }
        if tokens.len() < 4 {
            tracing::warn!("Skipping malformed VOL-ID line: '{}'", line);
            continue;
        }

        let volume = MappedVolume::new(tokens[3], tokens[1]);
        mapped.insert(volume.composite_key(), volume);
    }

    mapped
}

/// Best-effort device-path enrichment from the by-identifier directory.
///
/// An unreadable directory means no enrichment, not an error; a link whose
/// derived key has no parsed record is ignored rather than dereferenced.
fn enrich_device_paths(mapped: &mut BTreeMap<String, MappedVolume>, disk_by_id: &Path) {
    let entries = match std::fs::read_dir(disk_by_id) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(
                "Device directory '{}' unavailable, skipping enrichment: {}",
                disk_by_id.display(),
                e
            );
            return;
        }
    };

    let convention = Regex::new(r"^emc-vol-\w*-\w*$").unwrap();

    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !convention.is_match(&name) {
            continue;
        }

        // regex 已保證前綴存在
        let key = match name.strip_prefix(DEVICE_PREFIX) {
            Some(key) => key,
            None => continue,
        };

        let Some(volume) = mapped.get_mut(key) else {
            tracing::debug!("Device entry '{}' has no mapped volume, ignoring", name);
            continue;
        };

        match std::fs::canonicalize(entry.path()) {
            Ok(device) => volume.device = Some(device.to_string_lossy().into_owned()),
            Err(e) => {
                tracing::debug!("Could not resolve device link '{}': {}", name, e);
            }
        }
    }
}

/// Discover all volumes the local SDC agent reports as attached, enriched
/// with the OS device path where one is discoverable.
///
/// Result is sorted by composite key. Failure to invoke the utility is
/// fatal; the device directory is best-effort.
pub async fn local_volume_map() -> Result<Vec<MappedVolume>> {
    local_volume_map_with(&DrvCfg::default(), Path::new(DISK_BY_ID_PATH)).await
}

/// Injectable form of [`local_volume_map`].
pub async fn local_volume_map_with<D: DriverConfig>(
    driver: &D,
    disk_by_id: &Path,
) -> Result<Vec<MappedVolume>> {
    let output = driver.query_volumes().await?;

    let mut mapped = parse_query_vols(&output);
    enrich_device_paths(&mut mapped, disk_by_id);

    tracing::info!("💾 Resolved {} locally mapped volume(s)", mapped.len());
    // BTreeMap 的走訪順序即複合鍵的字典序
    Ok(mapped.into_values().collect())
}
