// SPDX-FileCopyrightText: 2026 Funcenv Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Funcenv - INI-driven environment injection for serverless functions.
//!
//! This is the standalone CLI entry point. It loads the service
//! descriptor, wires the HTTP provider bridge gateway and the real
//! process environment into the plugin, and dispatches the lifecycle
//! event matching the invoked command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::RwLock;
use tracing::error;

use funcenv_config::{ServiceDescriptor, render_errors};
use funcenv_core::{ProcessEnv, ServiceModel};
use funcenv_gateway::HttpGateway;
use funcenv_plugin::{EnvPlugin, HookEvent, PluginOptions};

/// Funcenv - INI-driven environment injection for serverless functions.
#[derive(Parser, Debug)]
#[command(name = "funcenv", version, about, long_about = None)]
struct Cli {
    /// Path to the service descriptor (defaults to ./funcenv.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Update all function environments.
    UpdateEnvironments {
        /// Stage of the service.
        #[arg(short, long)]
        stage: Option<String>,

        /// Update a single function's environment vars.
        #[arg(short, long)]
        function: Option<String>,

        #[command(subcommand)]
        command: Option<UpdateCommands>,
    },
    /// Resolve provider references for local emulation.
    Offline {
        /// Stage of the service.
        #[arg(short, long)]
        stage: Option<String>,
    },
}

/// Nested subcommands of `update-environments`.
#[derive(Subcommand, Debug)]
enum UpdateCommands {
    /// Update a single function's environment vars.
    Function {
        /// Name of the function.
        #[arg(short, long)]
        function: String,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let descriptor = match load_descriptor(cli.config.as_deref()) {
        Ok(descriptor) => descriptor,
        Err(errors) => {
            render_errors(&errors);
            std::process::exit(1);
        }
    };

    let (event, stage, function) = match cli.command {
        Commands::UpdateEnvironments {
            stage,
            function,
            command,
        } => match (function, command) {
            (_, Some(UpdateCommands::Function { function })) => {
                (HookEvent::UpdateFunction, stage, Some(function))
            }
            (Some(function), None) => (HookEvent::UpdateFunction, stage, Some(function)),
            (None, None) => (HookEvent::UpdateAll, stage, None),
        },
        Commands::Offline { stage } => (HookEvent::OfflineStart, stage, None),
    };

    if let Err(e) = run(descriptor, event, stage, function).await {
        error!(error = %e, "funcenv failed");
        std::process::exit(1);
    }
}

async fn run(
    descriptor: ServiceDescriptor,
    event: HookEvent,
    stage: Option<String>,
    function: Option<String>,
) -> Result<(), funcenv_core::FuncenvError> {
    let stage = stage.unwrap_or_else(|| descriptor.service.stage.clone());

    let gateway = HttpGateway::new(
        &descriptor.gateway.endpoint,
        descriptor.gateway.timeout_secs,
        descriptor.provider.region.clone(),
        &descriptor.service.name,
        &stage,
    )?;

    let settings = descriptor.settings.clone();
    let service: Arc<RwLock<dyn ServiceModel>> = Arc::new(RwLock::new(descriptor));

    let plugin = EnvPlugin::new(
        service.clone(),
        Arc::new(gateway),
        Arc::new(ProcessEnv),
        settings.as_ref(),
        PluginOptions {
            stage: Some(stage),
            function,
            base_dir: None,
        },
    )
    .await?;

    plugin.handle_hook(event).await?;

    if event == HookEvent::OfflineStart {
        print_provider_environment(&service).await;
    }
    Ok(())
}

fn load_descriptor(
    path: Option<&std::path::Path>,
) -> Result<ServiceDescriptor, Vec<funcenv_config::ConfigError>> {
    match path {
        Some(path) => funcenv_config::load_and_validate_path(path),
        None => funcenv_config::load_and_validate(),
    }
}

/// Print the provider environment after reference resolution, one
/// `KEY=value` line per entry, unresolved entries in their symbolic form.
async fn print_provider_environment(service: &Arc<RwLock<dyn ServiceModel>>) {
    let block = service.read().await.provider_environment();
    for (key, value) in block {
        match value.as_str() {
            Some(text) => println!("{key}={text}"),
            None => println!("{key}={value}"),
        }
    }
}

/// Initializes the tracing subscriber.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("funcenv=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
