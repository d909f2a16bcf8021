use std::io::Write;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::config::{Config, Secrets};
use crate::console::{Console, Glyph};
use crate::error::DeployResult;
use crate::instance::InstanceSpec;
use crate::provision::Provisioner;
use crate::provision::models::CreateInstanceRequest;
use crate::provision::vultr::{API_BASE_URL, Vultr};
use crate::user_data;

/// Port the application UI listens on once started.
pub const APP_PORT: u16 = 8501;

/// Fallback shown when the account has no email.
pub const ACCOUNT_FALLBACK: &str = "Active";

/// Fallback shown when the created instance has no id yet.
pub const INSTANCE_FALLBACK: &str = "pending";

/// What a completed run learned from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub account_email: Option<String>,
    pub region_count: usize,
    pub instance_id: Option<String>,
}

/// Run the deployment sequence against `provisioner`.
///
/// Each step waits for the previous one. The first failure aborts
/// the run: later calls are not made and nothing already created is
/// rolled back.
pub async fn deploy<W: Write + Send>(
    provisioner: &dyn Provisioner,
    request: &CreateInstanceRequest,
    console: &mut Console<W>,
) -> DeployResult<Deployment> {
    console.line(Glyph::Launch, "Starting Vultr Deployment...")?;
    console.blank()?;

    console.line(Glyph::Account, "Step 1: Checking Vultr account...")?;
    console.flush()?;
    let account = provisioner.account().await?;
    let account_email = account.email().map(String::from);
    console.success(&format!(
        "Account verified: {}",
        account_email.as_deref().unwrap_or(ACCOUNT_FALLBACK)
    ))?;

    console.line(Glyph::Search, "Step 2: Fetching available regions...")?;
    console.flush()?;
    let region_count = provisioner.regions().await?.count();
    console.success(&format!("Found {region_count} regions"))?;

    console.line(Glyph::Package, "Step 3: Creating server instance...")?;
    console.flush()?;
    let instance = provisioner.create_instance(request).await?;
    let instance_id = instance.id().map(String::from);
    info!(
        instance_id = instance_id.as_deref().unwrap_or(INSTANCE_FALLBACK),
        region = %request.region,
        plan = %request.plan,
        "Instance requested"
    );
    console.success(&format!(
        "Server created: {}",
        instance_id.as_deref().unwrap_or(INSTANCE_FALLBACK)
    ))?;

    print_next_steps(console)?;

    Ok(Deployment {
        account_email,
        region_count,
        instance_id,
    })
}

fn print_next_steps<W: Write>(console: &mut Console<W>) -> DeployResult<()> {
    console.line(Glyph::Wait, "Step 4: Waiting for server to be ready...")?;
    console.detail("This may take 2-5 minutes...")?;
    console.blank()?;

    console.line(Glyph::Success, "Deployment initiated successfully!")?;
    console.blank()?;
    console.line(Glyph::Notes, "Next steps:")?;
    console.detail("1. Wait for server to finish provisioning")?;
    console.detail("2. SSH into server and verify deployment")?;
    console.detail("3. Configure DNS to point to server IP")?;
    console.detail("4. Set up SSL certificate with Let's Encrypt")?;
    console.blank()?;
    console.line(
        Glyph::Web,
        &format!("Access your app at: http://<server-ip>:{APP_PORT}"),
    )?;
    console.flush()?;
    Ok(())
}

/// Deployment pipeline: resolves configuration, then drives the
/// provider through the deployment sequence.
pub struct Pipeline {
    instance: InstanceSpec,
    api_url: String,
}

impl Pipeline {
    #[must_use]
    pub fn new(instance: InstanceSpec) -> Self {
        Self {
            instance,
            api_url: API_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    /// Parse CLI arguments and dispatch against the process
    /// environment, writing progress to stdout.
    pub async fn run(&self) -> DeployResult<()> {
        let command = Cli::parse().into_command();
        let env = |key: &str| std::env::var(key).ok();
        self.dispatch(&command, &env, &mut std::io::stdout()).await
    }

    /// Execute `command`, resolving environment values through
    /// `lookup`.
    pub async fn dispatch<W: Write + Send>(
        &self,
        command: &Command,
        lookup: &(dyn Fn(&str) -> Option<String> + Sync),
        out: &mut W,
    ) -> DeployResult<()> {
        match command {
            Command::Deploy(args) if args.dry_run => {
                let secrets = Secrets::from_lookup(lookup);
                self.cmd_deploy_dry_run(&args.apply(self.instance.clone()), &secrets, out)
            }
            Command::Deploy(args) => {
                let config = Config::from_lookup(lookup)?;
                let spec = args.apply(self.instance.clone());
                self.cmd_deploy(&config, &spec, out).await?;
                Ok(())
            }
            Command::UserData => {
                let secrets = Secrets::from_lookup(lookup);
                write!(out, "{}", user_data::render(&secrets))?;
                Ok(())
            }
        }
    }

    async fn cmd_deploy<W: Write + Send>(
        &self,
        config: &Config,
        spec: &InstanceSpec,
        out: &mut W,
    ) -> DeployResult<Deployment> {
        let vultr = Vultr::from_config(config).with_base_url(&self.api_url);
        let request = spec.request(&user_data::render(&config.secrets));

        let mut console = Console::new(out);
        deploy(&vultr, &request, &mut console).await
    }

    fn cmd_deploy_dry_run<W: Write>(
        &self,
        spec: &InstanceSpec,
        secrets: &Secrets,
        out: &mut W,
    ) -> DeployResult<()> {
        let request = spec.request(&user_data::render(secrets));
        let body = serde_json::to_string_pretty(&request)?;

        writeln!(out, "=== Dry run: no changes will be made ===")?;
        writeln!(out)?;
        writeln!(out, "--- POST {}/instances ---", self.api_url)?;
        writeln!(out, "{body}")?;
        writeln!(out)?;
        writeln!(out, "--- Actions that would be performed ---")?;
        writeln!(out, "1. Verify account: GET {}/account", self.api_url)?;
        writeln!(out, "2. List regions: GET {}/regions", self.api_url)?;
        writeln!(
            out,
            "3. Create instance '{}' ({} in {}, os {})",
            spec.label, spec.plan, spec.region, spec.os_id
        )?;
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(InstanceSpec::new())
    }
}

#[derive(Parser)]
#[command(name = "vultr-deploy")]
#[command(about = "Provision the health assistant on a Vultr instance")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub deploy: DeployArgs,
}

impl Cli {
    /// The subcommand to run; `deploy` when none was given.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Deploy(self.deploy))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Verify the account, list regions and create an instance
    /// (default)
    Deploy(DeployArgs),

    /// Print the generated cloud-init boot script
    UserData,
}

impl Default for Command {
    fn default() -> Self {
        Self::Deploy(DeployArgs::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct DeployArgs {
    /// Preview the creation request without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Region code
    #[arg(long)]
    pub region: Option<String>,

    /// Plan identifier
    #[arg(long)]
    pub plan: Option<String>,

    /// Operating system id
    #[arg(long)]
    pub os_id: Option<u32>,

    /// Instance label and hostname
    #[arg(long)]
    pub label: Option<String>,
}

impl DeployArgs {
    /// Overlay the flags that were given on `spec`.
    #[must_use]
    pub fn apply(&self, mut spec: InstanceSpec) -> InstanceSpec {
        if let Some(region) = &self.region {
            spec = spec.region(region);
        }
        if let Some(plan) = &self.plan {
            spec = spec.plan(plan);
        }
        if let Some(os_id) = self.os_id {
            spec = spec.os_id(os_id);
        }
        if let Some(label) = &self.label {
            spec = spec.label(label).hostname(label);
        }
        spec
    }
}
