//! Node cluster command implementation.

use std::io::Write;

use longshore_api::{NodeClusterDefinition, PlatformClient};
use longshore_core::resolve;

use crate::cli::{CreateClusterArgs, NodeClusterCommands};
use crate::commands::{finish_bulk, resolve_each};
use crate::error::CliError;
use crate::output::{
    short_uuid, Message, NodeClusterDetail, NodeClusterList, OutputFormat,
};

/// Node cluster command executor.
pub struct NodeClusterCommand<'a> {
    client: &'a PlatformClient,
}

impl<'a> NodeClusterCommand<'a> {
    /// Create a new node cluster command.
    #[must_use]
    pub fn new(client: &'a PlatformClient) -> Self {
        Self { client }
    }

    /// Execute a node cluster subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &NodeClusterCommands,
    ) -> Result<(), CliError> {
        let clusters = self.client.node_clusters();
        match command {
            NodeClusterCommands::List => {
                let list = clusters.list_all().await?;
                format.write(writer, &NodeClusterList { clusters: list })?;
            }
            NodeClusterCommands::Inspect { identifier } => {
                let cluster = resolve(&clusters, identifier).await?;
                format.write(writer, &NodeClusterDetail { cluster })?;
            }
            NodeClusterCommands::Create(args) => {
                let cluster = clusters.create(&build_definition(args)).await?;
                format.write(
                    writer,
                    &Message::success(format!(
                        "node cluster {} ({}) provisioning",
                        cluster.name,
                        short_uuid(&cluster.uuid)
                    )),
                )?;
            }
            NodeClusterCommands::Scale { identifier, target } => {
                let cluster = resolve(&clusters, identifier).await?;
                clusters.scale(&cluster.uuid, *target).await?;
                format.write(
                    writer,
                    &Message::success(format!(
                        "node cluster {} scaling to {target} nodes",
                        cluster.name
                    )),
                )?;
            }
            NodeClusterCommands::Terminate { identifiers } => {
                let (resolved, failed) = resolve_each(&clusters, identifiers).await?;
                for cluster in resolved {
                    clusters.terminate(&cluster.uuid).await?;
                    format.write(
                        writer,
                        &Message::success(format!(
                            "node cluster {} terminating",
                            cluster.name
                        )),
                    )?;
                }
                finish_bulk(failed, identifiers.len())?;
            }
        }
        Ok(())
    }
}

fn build_definition(args: &CreateClusterArgs) -> NodeClusterDefinition {
    NodeClusterDefinition {
        name: args.name.clone(),
        region: args.region.clone(),
        node_type: args.node_type.clone(),
        target_num_nodes: Some(args.target_num_nodes),
    }
}
