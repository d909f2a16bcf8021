use crate::provision::models::CreateInstanceRequest;

/// Ubuntu 22.04 x64.
pub const DEFAULT_OS_ID: u32 = 387;

/// Describes the instance to create: placement, size, image and
/// naming.
///
/// # Example
///
/// ```
/// use vultr_deploy::InstanceSpec;
///
/// let spec = InstanceSpec::new().region("ams").plan("vc2-2c-4gb");
///
/// assert_eq!(spec.region, "ams");
/// assert_eq!(spec.plan, "vc2-2c-4gb");
/// assert_eq!(spec.os_id, 387);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSpec {
    pub region: String,
    pub plan: String,
    pub os_id: u32,
    pub label: String,
    pub hostname: String,
    pub enable_ipv6: bool,
    pub backups: bool,
}

impl InstanceSpec {
    #[must_use]
    pub fn new() -> Self {
        Self {
            region: "ewr".to_string(),
            plan: "vc2-1c-1gb".to_string(),
            os_id: DEFAULT_OS_ID,
            label: "health-assistant".to_string(),
            hostname: "health-assistant".to_string(),
            enable_ipv6: true,
            backups: true,
        }
    }

    #[must_use]
    pub fn region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    #[must_use]
    pub fn plan(mut self, plan: &str) -> Self {
        self.plan = plan.to_string();
        self
    }

    #[must_use]
    pub const fn os_id(mut self, os_id: u32) -> Self {
        self.os_id = os_id;
        self
    }

    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    #[must_use]
    pub fn hostname(mut self, hostname: &str) -> Self {
        self.hostname = hostname.to_string();
        self
    }

    /// Build the creation body, attaching `user_data` as-is.
    #[must_use]
    pub fn request(&self, user_data: &str) -> CreateInstanceRequest {
        CreateInstanceRequest {
            region: self.region.clone(),
            plan: self.plan.clone(),
            os_id: self.os_id,
            label: self.label.clone(),
            hostname: self.hostname.clone(),
            enable_ipv6: self.enable_ipv6,
            backups: if self.backups { "enabled" } else { "disabled" }.to_string(),
            user_data: user_data.to_string(),
        }
    }
}

impl Default for InstanceSpec {
    fn default() -> Self {
        Self::new()
    }
}
