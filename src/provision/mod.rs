pub mod models;
pub mod vultr;

use async_trait::async_trait;

use crate::error::DeployResult;
use models::{AccountResponse, CreateInstanceRequest, InstanceResponse, RegionListResponse};

/// A provisioner talks to a cloud provider: it verifies the
/// account, lists regions, and creates instances.
///
/// Each call is independent. Implementations do not retry and do
/// not deduplicate: calling [`create_instance`] twice creates two
/// instances.
///
/// [`create_instance`]: Provisioner::create_instance
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Fetch the authenticated account.
    async fn account(&self) -> DeployResult<AccountResponse>;

    /// List the regions instances can be placed in.
    async fn regions(&self) -> DeployResult<RegionListResponse>;

    /// Create one instance.
    async fn create_instance(&self, request: &CreateInstanceRequest)
    -> DeployResult<InstanceResponse>;
}
