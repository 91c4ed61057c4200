// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command line surface and command dispatch

use crate::config::Config;
use crate::constants::{AUTODETECT, SECRET_ANNOTATIONS_DOCS_URL};
use crate::environ::{self, EnvironmentEntry};
use crate::kubernetes::{connect, detect_flavor, detect_namespace, ClusterConnection};
use crate::output;
use crate::packages::list_packages;
use crate::secrets::SecretProvisioner;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{debug, info};

/// fabric8ctl - set up and inspect fabric8 resources on Kubernetes or OpenShift
#[derive(Parser, Debug)]
#[command(name = "fabric8ctl", version, about, long_about = None)]
pub struct Cli {
    /// Namespace to use instead of the one from the current kube context
    #[arg(short = 'n', long, global = true, env = "FABRIC8_NAMESPACE")]
    pub namespace: Option<String>,

    /// Project environments live in, or `autodetect` to derive it from the current project
    #[arg(long, global = true, default_value = AUTODETECT)]
    pub work_project: String,

    /// Do not ask for confirmation
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up secrets on your Kubernetes or OpenShift installation
    Secrets(SecretsArgs),

    /// Display resources
    Get {
        #[command(subcommand)]
        resource: GetResource,
    },

    /// Create resources
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// Delete resources
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// List the packages that are currently installed
    Packages,
}

#[derive(Args, Debug)]
pub struct SecretsArgs {
    /// Log the local folder each secret is imported from
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub print_import_folder_structure: bool,

    /// Store generated keys in the local secrets folder
    #[arg(
        long,
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub write_generated_keys: bool,

    /// Generate secret data when none can be imported
    #[arg(
        short = 'g',
        long,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub generate_secrets_data: bool,
}

#[derive(Subcommand, Debug)]
pub enum GetResource {
    /// List the environments of the work project
    #[command(visible_alias = "env")]
    Environ,
}

#[derive(Subcommand, Debug)]
pub enum CreateResource {
    /// Create or replace an environment: name=<name> namespace=<namespace> order=<n>
    #[command(visible_alias = "env")]
    Environ {
        #[arg(required = true, num_args = 1..)]
        assignments: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DeleteResource {
    /// Delete an environment by name
    #[command(visible_alias = "env")]
    Environ { name: String },
}

/// Run the parsed command against the current cluster
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    debug!("Configuration loaded: {:?}", config);

    let connection = connect(cli.namespace.as_deref()).await?;
    info!("Connected to {}", connection.host);

    match cli.command {
        Commands::Secrets(ref args) => run_secrets(&cli, args, &config, &connection).await,
        Commands::Get {
            resource: GetResource::Environ,
        } => {
            let ns = work_namespace(&cli, &connection).await?;
            let environments = environ::list_environments(&connection.client, &ns).await?;
            print!("{}", environ::format_environments(&environments));
            Ok(())
        }
        Commands::Create {
            resource: CreateResource::Environ { ref assignments },
        } => {
            let entry = EnvironmentEntry::from_args(assignments)?;
            let ns = work_namespace(&cli, &connection).await?;
            environ::create_environment(&connection.client, &ns, &entry).await?;
            output::success(&format!("Created environment {}", entry.name));
            Ok(())
        }
        Commands::Delete {
            resource: DeleteResource::Environ { ref name },
        } => {
            let ns = work_namespace(&cli, &connection).await?;
            if environ::delete_environment(&connection.client, &ns, name).await? {
                output::success(&format!("Deleted environment {}", name));
            } else {
                output::warn(&format!("No environment {} found in {}", name, ns));
            }
            Ok(())
        }
        Commands::Packages => run_packages(&connection).await,
    }
}

async fn work_namespace(cli: &Cli, connection: &ClusterConnection) -> anyhow::Result<String> {
    Ok(detect_namespace(
        &connection.client,
        &cli.work_project,
        &connection.default_namespace,
    )
    .await?)
}

async fn run_secrets(
    cli: &Cli,
    args: &SecretsArgs,
    config: &Config,
    connection: &ClusterConnection,
) -> anyhow::Result<()> {
    let flavor = detect_flavor(&connection.client).await?;
    output::banner(
        "Setting up secrets on your",
        flavor,
        &connection.host,
        &connection.default_namespace,
    );

    if !output::confirm("Continue?", cli.yes)? {
        output::warn("Aborted");
        return Ok(());
    }

    let options = config.secrets_options(
        args.print_import_folder_structure,
        args.write_generated_keys,
        args.generate_secrets_data,
    );
    let provisioner = SecretProvisioner::new(
        connection.client.clone(),
        connection.default_namespace.clone(),
        options,
    )?;
    let report = provisioner.run(flavor.is_openshift()).await?;

    if report.created() == 0 {
        output::warn("No secrets created as no fabric8 secrets annotations found in the Fabric8 Catalog");
        output::hint(&format!("For more details see: {}", SECRET_ANNOTATIONS_DOCS_URL));
    }
    Ok(())
}

async fn run_packages(connection: &ClusterConnection) -> anyhow::Result<()> {
    let flavor = detect_flavor(&connection.client).await?;
    output::banner(
        "Packages in your",
        flavor,
        &connection.host,
        &connection.default_namespace,
    );

    for package in list_packages(&connection.client, &connection.default_namespace).await? {
        println!("{}", package);
    }
    Ok(())
}
