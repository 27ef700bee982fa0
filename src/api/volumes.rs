use crate::domain::model::{link_for, StoragePoolRecord, Volume, VolumeCreateResp, VolumeParam};
use crate::domain::ports::ApiClient;
use crate::utils::error::{Result, SioError};

/// Link relation the pool resource exposes for its volumes.
pub const VOLUME_RELATIONSHIP: &str = "/api/StoragePool/relationship/Volume";

/// Fixed creation path, pool-independent.
pub const VOLUME_CREATE_PATH: &str = "/api/types/Volume/instances";

/// How to select volumes within a pool.
#[derive(Debug, Clone)]
pub enum VolumeQuery {
    /// 透過 pool 資源上的 relationship link 取得全部 volume
    All,
    ById(String),
    ByHref(String),
}

/// Storage-pool-scoped volume operations. Holds only the pool's resource
/// representation; the transport is injected per call.
#[derive(Debug, Clone)]
pub struct StoragePool {
    pub record: StoragePoolRecord,
}

impl StoragePool {
    pub fn new(record: StoragePoolRecord) -> Self {
        Self { record }
    }

    /// Fetch a pool's resource representation by id.
    pub async fn fetch<C: ApiClient>(client: &C, pool_id: &str) -> Result<Self> {
        let value = client
            .get(&format!("/api/instances/StoragePool::{}", pool_id))
            .await?;
        let record = serde_json::from_value::<StoragePoolRecord>(value)
            .map_err(|e| SioError::decode("storage pool instance", e))?;
        Ok(Self::new(record))
    }

    /// List or fetch volumes in this pool.
    ///
    /// `VolumeQuery::All` follows the pool's volume relationship link (a
    /// missing link is an error, never an empty success) and decodes an
    /// array; the targeted variants decode a single object and wrap it.
    pub async fn volumes<C: ApiClient>(&self, client: &C, query: VolumeQuery) -> Result<Vec<Volume>> {
        let (path, expect_list) = match &query {
            VolumeQuery::ById(id) => (format!("/api/instances/Volume::{}", id), false),
            VolumeQuery::ByHref(href) => (href.clone(), false),
            VolumeQuery::All => {
                let link = link_for(&self.record.links, VOLUME_RELATIONSHIP).ok_or_else(|| {
                    SioError::LinkNotFound {
                        rel: VOLUME_RELATIONSHIP.to_string(),
                    }
                })?;
                (link.href.clone(), true)
            }
        };

        let value = client.get(&path).await?;

        let volumes = if expect_list {
            serde_json::from_value::<Vec<Volume>>(value)
                .map_err(|e| SioError::decode("storage pool volumes", e))?
        } else {
            let volume = serde_json::from_value::<Volume>(value)
                .map_err(|e| SioError::decode("volume instance", e))?;
            vec![volume]
        };

        tracing::debug!(
            "Fetched {} volume(s) from pool '{}'",
            volumes.len(),
            self.record.name
        );
        Ok(volumes)
    }

    /// Upstream never implemented this lookup; surface that instead of
    /// returning an empty record.
    pub async fn find_volume<C: ApiClient>(
        &self,
        _client: &C,
        _id: &str,
        _name: &str,
        _href: &str,
    ) -> Result<Volume> {
        Err(SioError::NotImplemented {
            operation: "FindVolume".to_string(),
        })
    }

    /// Create a volume in this pool.
    ///
    /// The pool's own id and protection-domain id are stamped into the
    /// outgoing param, overriding whatever the caller set there.
    pub async fn create_volume<C: ApiClient>(
        &self,
        client: &C,
        mut param: VolumeParam,
    ) -> Result<VolumeCreateResp> {
        param.storage_pool_id = self.record.id.clone();
        param.protection_domain_id = self.record.protection_domain_id.clone();

        let body = serde_json::to_value(&param)?;
        let value = client.post(VOLUME_CREATE_PATH, body).await?;

        let resp = serde_json::from_value::<VolumeCreateResp>(value)
            .map_err(|e| SioError::decode("volume creation", e))?;

        tracing::info!(
            "✅ Created volume '{}' ({}) in pool '{}'",
            param.name,
            resp.id,
            self.record.name
        );
        Ok(resp)
    }
}
