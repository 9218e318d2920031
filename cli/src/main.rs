use clap::{Parser, Subcommand};
use cli::commands::{handle_deploy, handle_list_deployments, handle_list_steps, DeployArgs};
use deploy_utils::setup_logging;
use log::{error, LevelFilter};

#[derive(Parser)]
#[command(name = "merchant-deploy", version = env!("APP_VERSION"))]
#[command(about = "Deploys the Merchant contracts and keeps track of where they live")]
struct Cli {
    /// Path to the deploy config, defaults to deploy.yaml
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run deploy steps against a network
    Deploy {
        /// Network from the config, e.g. localhost
        #[arg(long)]
        network: Option<String>,
        /// Only run steps with these tags, e.g. --tags Merchant
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Forget previous deployments on this network before running
        #[arg(long)]
        reset: bool,
    },
    /// List the registered deploy steps
    Steps,
    /// Show the deployments recorded for a network
    Deployments {
        #[arg(long)]
        network: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = setup_logging(LevelFilter::Info) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match &cli.command {
        Commands::Deploy {
            network,
            tags,
            reset,
        } => handle_deploy(DeployArgs {
            config_path: config,
            network: network.as_deref(),
            tags: tags.clone(),
            reset: *reset,
        })
        .await
        .map(|_| ()),
        Commands::Steps => handle_list_steps(),
        Commands::Deployments { network } => handle_list_deployments(config, network.as_deref()),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
