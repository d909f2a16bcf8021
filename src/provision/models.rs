//! Vultr API request and response models.
//!
//! Responses are parsed leniently: only the fields the deployer
//! reports are typed, everything else is ignored, and every typed
//! field may be absent or null.

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

// ============================================================================
// Account
// ============================================================================

/// `GET /account` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccountResponse {
    pub account: Option<Account>,
}

/// Account details.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Account {
    pub email: Option<String>,
}

impl AccountResponse {
    /// The account email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.account.as_ref().and_then(|a| a.email.as_deref())
    }
}

// ============================================================================
// Regions
// ============================================================================

/// `GET /regions` response.
///
/// Only the number of entries matters, so their shape is not
/// checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegionListResponse {
    pub regions: Option<Vec<IgnoredAny>>,
}

impl RegionListResponse {
    /// Number of regions listed, zero when the field is absent.
    #[must_use]
    pub fn count(&self) -> usize {
        self.regions.as_ref().map_or(0, Vec::len)
    }
}

// ============================================================================
// Instances
// ============================================================================

/// `POST /instances` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateInstanceRequest {
    pub region: String,
    pub plan: String,
    pub os_id: u32,
    pub label: String,
    pub hostname: String,
    pub enable_ipv6: bool,
    /// `"enabled"` or `"disabled"`.
    pub backups: String,
    /// Cloud-init script run on first boot.
    pub user_data: String,
}

/// `POST /instances` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstanceResponse {
    pub instance: Option<Instance>,
}

/// A created instance. The id may be missing while provisioning
/// is still pending.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Instance {
    pub id: Option<String>,
}

impl InstanceResponse {
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.instance.as_ref().and_then(|i| i.id.as_deref())
    }
}
