use crate::utils::error::Result;
use async_trait::async_trait;

/// Authenticated transport to the array management endpoint. Operations
/// receive an implementation of this instead of holding a shared handle.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get(&self, path: &str) -> Result<serde_json::Value>;
    async fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value>;
}

/// Host-local device-configuration utility (the SDC agent tool).
#[async_trait]
pub trait DriverConfig: Send + Sync {
    /// Raw stdout of the "query volumes" directive.
    async fn query_volumes(&self) -> Result<String>;
}
