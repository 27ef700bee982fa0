use anyhow::Result;
use async_trait::async_trait;
use sioclient::domain::ports::DriverConfig;
use sioclient::sdc::{local_volume_map_with, DrvCfg};
use sioclient::SioError;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

struct CannedDriver {
    output: String,
}

#[async_trait]
impl DriverConfig for CannedDriver {
    async fn query_volumes(&self) -> sioclient::Result<String> {
        Ok(self.output.clone())
    }
}

struct FailingDriver;

#[async_trait]
impl DriverConfig for FailingDriver {
    async fn query_volumes(&self) -> sioclient::Result<String> {
        Err(SioError::QueryVolumesError {
            message: "drv_cfg not installed".to_string(),
        })
    }
}

/// 建立 /dev/disk/by-id 形式的目錄：emc-vol-<key> 符號連結指向真實檔案
fn device_dir(links: &[(&str, &str)]) -> Result<TempDir> {
    let dir = TempDir::new()?;
    for (name, target) in links {
        let target_path = dir.path().join(target);
        std::fs::write(&target_path, b"")?;
        std::os::unix::fs::symlink(&target_path, dir.path().join(name))?;
    }
    Ok(dir)
}

#[tokio::test]
async fn test_two_volume_scenario_with_one_device_mapped() -> Result<()> {
    let driver = CannedDriver {
        output: "\
VOL-ID xyz MDM-ID mdm1
VOL-ID abc MDM-ID mdm1
"
        .to_string(),
    };
    let dir = device_dir(&[("emc-vol-mdm1-abc", "sdb")])?;

    let volumes = local_volume_map_with(&driver, dir.path()).await?;

    assert_eq!(volumes.len(), 2);
    // 按複合鍵排序：mdm1-abc 在 mdm1-xyz 之前
    assert_eq!(volumes[0].volume_id, "abc");
    assert_eq!(volumes[0].mdm_id, "mdm1");
    let device = volumes[0].device.as_deref().unwrap();
    assert!(device.ends_with("sdb"), "unexpected device: {device}");
    assert_eq!(volumes[1].volume_id, "xyz");
    assert!(volumes[1].device.is_none());
    Ok(())
}

#[tokio::test]
async fn test_output_sorted_regardless_of_input_order() -> Result<()> {
    let driver = CannedDriver {
        output: "\
VOL-ID ccc MDM-ID mdm2
VOL-ID aaa MDM-ID mdm9
VOL-ID bbb MDM-ID mdm1
"
        .to_string(),
    };
    let dir = TempDir::new()?;

    let volumes = local_volume_map_with(&driver, dir.path()).await?;

    let keys: Vec<String> = volumes.iter().map(|v| v.composite_key()).collect();
    assert_eq!(keys, vec!["mdm1-bbb", "mdm2-ccc", "mdm9-aaa"]);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_vol_id_lines_produce_one_record() -> Result<()> {
    let driver = CannedDriver {
        output: "\
VOL-ID abc MDM-ID mdm1
VOL-ID abc MDM-ID mdm1
"
        .to_string(),
    };
    let dir = TempDir::new()?;

    let volumes = local_volume_map_with(&driver, dir.path()).await?;
    assert_eq!(volumes.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_unmatched_device_entry_is_silently_ignored() -> Result<()> {
    let driver = CannedDriver {
        output: "VOL-ID abc MDM-ID mdm1\n".to_string(),
    };
    // 目錄有 mdm7-qqq 的連結，但子行程未回報該 volume
    let dir = device_dir(&[("emc-vol-mdm7-qqq", "sdc"), ("emc-vol-mdm1-abc", "sdb")])?;

    let volumes = local_volume_map_with(&driver, dir.path()).await?;

    assert_eq!(volumes.len(), 1);
    assert_eq!(volumes[0].composite_key(), "mdm1-abc");
    assert!(volumes[0].device.is_some());
    Ok(())
}

#[tokio::test]
async fn test_missing_device_directory_yields_unmapped_volumes() -> Result<()> {
    let driver = CannedDriver {
        output: "VOL-ID abc MDM-ID mdm1\n".to_string(),
    };

    let volumes =
        local_volume_map_with(&driver, Path::new("/no/such/device/directory")).await?;

    assert_eq!(volumes.len(), 1);
    assert!(volumes[0].device.is_none());
    Ok(())
}

#[tokio::test]
async fn test_driver_failure_is_fatal_and_yields_no_partial_list() {
    let dir = TempDir::new().unwrap();

    let err = local_volume_map_with(&FailingDriver, dir.path())
        .await
        .unwrap_err();
    assert!(matches!(err, SioError::QueryVolumesError { .. }));
}

#[tokio::test]
async fn test_missing_drv_cfg_binary_is_a_query_error() {
    let driver = DrvCfg::new("/no/such/drv_cfg", Duration::from_secs(1));
    let dir = TempDir::new().unwrap();

    let err = local_volume_map_with(&driver, dir.path()).await.unwrap_err();
    assert!(matches!(err, SioError::QueryVolumesError { .. }));
}
