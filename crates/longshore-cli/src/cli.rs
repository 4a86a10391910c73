//! Command-line argument parsing with clap.

use clap::{Parser, Subcommand, ValueEnum};

/// Longshore CLI - container cloud from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "longshore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Platform API URL to talk to.
    #[arg(
        short = 'H',
        long,
        env = "LONGSHORE_HOST",
        default_value = "https://api.longshore.dev"
    )]
    pub host: String,

    /// API bearer token.
    #[arg(long, env = "LONGSHORE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[derive(Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Container management commands.
    Container {
        /// Container subcommand to execute.
        #[command(subcommand)]
        command: ContainerCommands,
    },

    /// Service management commands.
    Service {
        /// Service subcommand to execute.
        #[command(subcommand)]
        command: ServiceCommands,
    },

    /// Node management commands.
    Node {
        /// Node subcommand to execute.
        #[command(subcommand)]
        command: NodeCommands,
    },

    /// Node cluster management commands.
    NodeCluster {
        /// Node cluster subcommand to execute.
        #[command(subcommand)]
        command: NodeClusterCommands,
    },
}

/// Container subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ContainerCommands {
    /// List containers.
    Ps,

    /// Show detailed information about a container.
    Inspect {
        /// Container name, short UUID, or full UUID.
        identifier: String,
    },

    /// Create and deploy a container.
    Run(RunArgs),

    /// Start one or more stopped containers.
    Start {
        /// Container names, short UUIDs, or full UUIDs.
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// Stop one or more running containers.
    Stop {
        /// Container names, short UUIDs, or full UUIDs.
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// Terminate one or more containers.
    Terminate {
        /// Container names, short UUIDs, or full UUIDs.
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// Fetch the stored log tail of a container.
    Logs {
        /// Container name, short UUID, or full UUID.
        identifier: String,
    },
}

/// Service subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ServiceCommands {
    /// List services.
    Ps,

    /// Show detailed information about a service.
    Inspect {
        /// Service name, short UUID, or full UUID.
        identifier: String,
    },

    /// Create and deploy a service.
    Run(ServiceRunArgs),

    /// Scale a service to a target number of containers.
    Scale {
        /// Service name, short UUID, or full UUID.
        identifier: String,
        /// Number of containers to scale to.
        target: u32,
    },

    /// Start one or more stopped services.
    Start {
        /// Service names, short UUIDs, or full UUIDs.
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// Stop one or more running services.
    Stop {
        /// Service names, short UUIDs, or full UUIDs.
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// Terminate one or more services.
    Terminate {
        /// Service names, short UUIDs, or full UUIDs.
        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// Fetch the stored log tail of a service.
    Logs {
        /// Service name, short UUID, or full UUID.
        identifier: String,
    },
}

/// Node subcommands. Nodes carry no name, so identifiers here are full or
/// short UUIDs only.
#[derive(Subcommand, Debug, Clone)]
pub enum NodeCommands {
    /// List nodes.
    List,

    /// Show detailed information about a node.
    Inspect {
        /// Node short UUID or full UUID.
        identifier: String,
    },

    /// Terminate one or more nodes.
    Terminate {
        /// Node short UUIDs or full UUIDs.
        #[arg(required = true)]
        identifiers: Vec<String>,
    },
}

/// Node cluster subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum NodeClusterCommands {
    /// List node clusters.
    List,

    /// Show detailed information about a node cluster.
    Inspect {
        /// Cluster name, short UUID, or full UUID.
        identifier: String,
    },

    /// Create and provision a node cluster.
    Create(CreateClusterArgs),

    /// Scale a cluster to a target number of nodes.
    Scale {
        /// Cluster name, short UUID, or full UUID.
        identifier: String,
        /// Number of nodes to scale to.
        target: u32,
    },

    /// Terminate one or more node clusters.
    Terminate {
        /// Cluster names, short UUIDs, or full UUIDs.
        #[arg(required = true)]
        identifiers: Vec<String>,
    },
}

/// Arguments for the container run command.
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Container image to run.
    #[arg(required = true)]
    pub image: String,

    /// Container name.
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Ports to expose or publish ([HOST:]PORT[/PROTO]).
    #[arg(short = 'p', long = "publish", value_name = "[HOST:]PORT[/PROTO]")]
    pub publish: Vec<String>,

    /// Links to other containers (TARGET:ALIAS).
    #[arg(short = 'l', long = "link", value_name = "TARGET:ALIAS")]
    pub link: Vec<String>,

    /// Environment variables (KEY=VALUE).
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Entrypoint override.
    #[arg(long)]
    pub entrypoint: Option<String>,

    /// Command to execute in the container.
    #[arg(last = true)]
    pub command: Vec<String>,
}

/// Arguments for the service run command.
#[derive(Parser, Debug, Clone)]
pub struct ServiceRunArgs {
    /// Shared run arguments.
    #[command(flatten)]
    pub run: RunArgs,

    /// Number of containers to deploy.
    #[arg(long, default_value_t = 1)]
    pub target_num_containers: u32,
}

/// Arguments for creating a node cluster.
#[derive(Parser, Debug, Clone)]
pub struct CreateClusterArgs {
    /// Cluster name.
    #[arg(required = true)]
    pub name: String,

    /// Deployment region.
    #[arg(required = true)]
    pub region: String,

    /// Node type to provision.
    #[arg(required = true)]
    pub node_type: String,

    /// Number of nodes to provision.
    #[arg(long, default_value_t = 1)]
    pub target_num_nodes: u32,
}
