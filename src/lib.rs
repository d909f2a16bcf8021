//! Provision the multilingual health assistant on Vultr.
//!
//! One run verifies the Vultr account, lists the available
//! regions, and creates a single instance whose user data is a
//! generated cloud-init script. The script prepares the machine
//! (Docker, Docker Compose, Node.js, Lingo CLI) and writes the
//! application's `/app/.env`; cloning the repository and starting
//! the stack remain manual steps.
//!
//! # Overview
//!
//! - [`Config`] resolves `VULTR_API_KEY` and the optional
//!   application secrets from the environment, once
//! - [`InstanceSpec`] describes the instance to create
//! - [`user_data::render`] produces the boot script
//! - [`Vultr`] implements the [`Provisioner`] seam over the v2 REST
//!   API
//! - [`Pipeline`] drives the sequence and prints progress
//!
//! # Behaviour
//!
//! The three API calls run strictly in order and the first failure
//! aborts the run. Nothing is retried, polled or rolled back, and
//! running twice creates two instances.
//!
//! # Example
//!
//! ```rust,no_run
//! use vultr_deploy::{InstanceSpec, Pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let pipeline = Pipeline::new(InstanceSpec::new().region("ams"));
//!     pipeline.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ```sh
//! export VULTR_API_KEY=...
//! vultr-deploy                # deploy
//! vultr-deploy --dry-run      # show the request, call nothing
//! vultr-deploy user-data      # print the boot script
//! ```
//!
//! [`Provisioner`]: provision::Provisioner

// Allow noisy pedantic lints that don't add value for a
// deployment tool crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod config;
pub mod console;
pub mod error;
pub mod instance;
pub mod pipeline;
pub mod provision;
pub mod user_data;

pub use config::{Config, Secrets};
pub use error::{DeployError, DeployResult};
pub use instance::InstanceSpec;
pub use pipeline::{Deployment, Pipeline};
pub use provision::vultr::Vultr;
