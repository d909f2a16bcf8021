use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use vultr_deploy::config::Secrets;
use vultr_deploy::console::Console;
use vultr_deploy::error::{DeployError, DeployResult};
use vultr_deploy::pipeline::{self, Command, DeployArgs};
use vultr_deploy::provision::Provisioner;
use vultr_deploy::provision::models::{
    AccountResponse, CreateInstanceRequest, InstanceResponse, RegionListResponse,
};
use vultr_deploy::{InstanceSpec, user_data};

/// Records every call and answers from canned JSON.
struct FakeProvisioner {
    calls: Mutex<Vec<&'static str>>,
    created: Mutex<Vec<CreateInstanceRequest>>,
    fail_on: Option<&'static str>,
    account: serde_json::Value,
    regions: serde_json::Value,
    instance: serde_json::Value,
}

impl FakeProvisioner {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            fail_on: None,
            account: json!({"account": {"email": "ops@example.com"}}),
            regions: json!({"regions": [{"id": "ewr"}, {"id": "ams"}]}),
            instance: json!({"instance": {"id": "cb676a46-66fd-4dfb-b839-443f2e6c0b60"}}),
        }
    }

    fn failing_on(mut self, call: &'static str) -> Self {
        self.fail_on = Some(call);
        self
    }

    fn answer<T: serde::de::DeserializeOwned>(
        &self,
        call: &'static str,
        body: &serde_json::Value,
    ) -> DeployResult<T> {
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(call) {
            return Err(DeployError::Api {
                status: 500,
                body: format!("{call} unavailable"),
            });
        }
        Ok(serde_json::from_value(body.clone())?)
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provisioner for FakeProvisioner {
    async fn account(&self) -> DeployResult<AccountResponse> {
        self.answer("account", &self.account)
    }

    async fn regions(&self) -> DeployResult<RegionListResponse> {
        self.answer("regions", &self.regions)
    }

    async fn create_instance(
        &self,
        request: &CreateInstanceRequest,
    ) -> DeployResult<InstanceResponse> {
        self.created.lock().unwrap().push(request.clone());
        self.answer("create_instance", &self.instance)
    }
}

fn request() -> CreateInstanceRequest {
    InstanceSpec::new().request(&user_data::render(&Secrets::default()))
}

async fn run(provisioner: &FakeProvisioner) -> (DeployResult<pipeline::Deployment>, String) {
    let mut console = Console::new(Vec::new());
    let result = pipeline::deploy(provisioner, &request(), &mut console).await;
    (result, String::from_utf8(console.into_inner()).unwrap())
}

#[tokio::test]
async fn full_run_reports_each_step() {
    let fake = FakeProvisioner::new();

    let (result, out) = run(&fake).await;
    let deployment = result.unwrap();

    assert_eq!(fake.calls(), vec!["account", "regions", "create_instance"]);
    assert_eq!(deployment.account_email.as_deref(), Some("ops@example.com"));
    assert_eq!(deployment.region_count, 2);
    assert_eq!(
        deployment.instance_id.as_deref(),
        Some("cb676a46-66fd-4dfb-b839-443f2e6c0b60")
    );

    assert!(out.starts_with("🚀 Starting Vultr Deployment...\n\n"));
    assert!(out.contains("✅ Account verified: ops@example.com\n"));
    assert!(out.contains("✅ Found 2 regions\n"));
    assert!(out.contains("✅ Server created: cb676a46-66fd-4dfb-b839-443f2e6c0b60\n"));
    assert!(out.contains("⏳ Step 4: Waiting for server to be ready..."));
    assert!(out.contains("   4. Set up SSL certificate with Let's Encrypt\n"));
    assert!(out.ends_with("🌐 Access your app at: http://<server-ip>:8501\n"));
}

#[tokio::test]
async fn create_request_carries_fixed_descriptor_and_script() {
    let fake = FakeProvisioner::new();

    run(&fake).await.0.unwrap();

    let created = fake.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    let sent = &created[0];
    assert_eq!(sent.region, "ewr");
    assert_eq!(sent.plan, "vc2-1c-1gb");
    assert_eq!(sent.os_id, 387);
    assert!(sent.enable_ipv6);
    assert_eq!(sent.backups, "enabled");
    assert_eq!(sent.user_data, user_data::render(&Secrets::default()));
}

#[tokio::test]
async fn account_failure_stops_before_regions() {
    let fake = FakeProvisioner::new().failing_on("account");

    let (result, out) = run(&fake).await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "API error: 500 - account unavailable");
    assert_eq!(fake.calls(), vec!["account"]);
    assert!(out.contains("📋 Step 1: Checking Vultr account...\n"));
    assert!(!out.contains("✅"));
    assert!(!out.contains("Step 2"));
}

#[tokio::test]
async fn regions_failure_stops_before_create() {
    let fake = FakeProvisioner::new().failing_on("regions");

    let (result, _) = run(&fake).await;

    assert!(matches!(result, Err(DeployError::Api { status: 500, .. })));
    assert_eq!(fake.calls(), vec!["account", "regions"]);
    assert!(fake.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_failure_after_two_successes() {
    let fake = FakeProvisioner::new().failing_on("create_instance");

    let (result, out) = run(&fake).await;

    assert!(result.is_err());
    assert_eq!(out.matches('✅').count(), 2);
    assert!(out.contains("✅ Account verified: ops@example.com\n"));
    assert!(out.contains("✅ Found 2 regions\n"));
    assert!(!out.contains("Server created"));
    assert!(!out.contains("Next steps"));
}

#[tokio::test]
async fn missing_fields_use_fallbacks() {
    let mut fake = FakeProvisioner::new();
    fake.account = json!({"account": {"name": "No Email"}});
    fake.regions = json!({});
    fake.instance = json!({});

    let (result, out) = run(&fake).await;
    let deployment = result.unwrap();

    assert_eq!(deployment.region_count, 0);
    assert!(deployment.account_email.is_none());
    assert!(deployment.instance_id.is_none());
    assert!(out.contains("✅ Account verified: Active\n"));
    assert!(out.contains("✅ Found 0 regions\n"));
    assert!(out.contains("✅ Server created: pending\n"));
}

#[tokio::test]
async fn repeated_runs_create_independent_instances() {
    let fake = FakeProvisioner::new();

    run(&fake).await.0.unwrap();
    run(&fake).await.0.unwrap();

    let created = fake.created.lock().unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0], created[1]);
}

#[test]
fn flags_overlay_instance_spec() {
    let args = DeployArgs {
        region: Some("sjc".into()),
        label: Some("demo".into()),
        ..DeployArgs::default()
    };

    let spec = args.apply(InstanceSpec::new());

    assert_eq!(spec.region, "sjc");
    assert_eq!(spec.plan, "vc2-1c-1gb");
    assert_eq!(spec.label, "demo");
    assert_eq!(spec.hostname, "demo");
}

#[test]
fn default_command_is_deploy() {
    assert_eq!(Command::default(), Command::Deploy(DeployArgs::default()));
}
