use clap::Parser;
use sioclient::config::cli::Command;
use sioclient::domain::VolumeParam;
use sioclient::utils::{logger, validation::Validate};
use sioclient::{CliConfig, HttpApiClient, StoragePool, VolumeQuery};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting sioctl");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> sioclient::Result<()> {
    // 本地查詢不需要 gateway 配置
    if let Command::LocalVolumes = cli.command {
        let volumes = sioclient::local_volume_map().await?;
        for volume in &volumes {
            println!(
                "{}\t{}\t{}",
                volume.mdm_id,
                volume.volume_id,
                volume.device.as_deref().unwrap_or("-")
            );
        }
        tracing::info!("✅ Listed {} locally mapped volume(s)", volumes.len());
        return Ok(());
    }

    let config = cli.client_config()?;
    config.validate()?;

    let timeout = config.timeout_seconds().map(Duration::from_secs);
    let client = HttpApiClient::with_timeout(config.endpoint(), config.token(), timeout)?;

    match &cli.command {
        Command::Volumes { pool_id, volume_id } => {
            let pool = StoragePool::fetch(&client, pool_id).await?;
            let query = match volume_id {
                Some(id) => VolumeQuery::ById(id.clone()),
                None => VolumeQuery::All,
            };
            let volumes = pool.volumes(&client, query).await?;
            for volume in &volumes {
                println!("{}\t{}\t{} KB", volume.id, volume.name, volume.size_in_kb);
            }
            tracing::info!("✅ Listed {} volume(s)", volumes.len());
        }
        Command::CreateVolume {
            pool_id,
            name,
            size_kb,
            volume_type,
        } => {
            let pool = StoragePool::fetch(&client, pool_id).await?;
            let param = VolumeParam {
                name: name.clone(),
                volume_size_in_kb: size_kb.to_string(),
                volume_type: volume_type.clone(),
                ..VolumeParam::default()
            };
            let resp = pool.create_volume(&client, param).await?;
            println!("{}", resp.id);
        }
        Command::LocalVolumes => unreachable!("handled above"),
    }

    Ok(())
}
