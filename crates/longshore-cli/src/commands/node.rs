//! Node command implementation.
//!
//! Nodes carry no name, so identifiers here only ever resolve through the
//! UUID-prefix path.

use std::io::Write;

use longshore_api::PlatformClient;
use longshore_core::resolve;

use crate::cli::NodeCommands;
use crate::commands::{finish_bulk, resolve_each};
use crate::error::CliError;
use crate::output::{short_uuid, Message, NodeDetail, NodeList, OutputFormat};

/// Node command executor.
pub struct NodeCommand<'a> {
    client: &'a PlatformClient,
}

impl<'a> NodeCommand<'a> {
    /// Create a new node command.
    #[must_use]
    pub fn new(client: &'a PlatformClient) -> Self {
        Self { client }
    }

    /// Execute a node subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &NodeCommands,
    ) -> Result<(), CliError> {
        let nodes = self.client.nodes();
        match command {
            NodeCommands::List => {
                let list = nodes.list_all().await?;
                format.write(writer, &NodeList { nodes: list })?;
            }
            NodeCommands::Inspect { identifier } => {
                let node = resolve(&nodes, identifier).await?;
                format.write(writer, &NodeDetail { node })?;
            }
            NodeCommands::Terminate { identifiers } => {
                let (resolved, failed) = resolve_each(&nodes, identifiers).await?;
                for node in resolved {
                    nodes.terminate(&node.uuid).await?;
                    format.write(
                        writer,
                        &Message::success(format!(
                            "node {} terminating",
                            short_uuid(&node.uuid)
                        )),
                    )?;
                }
                finish_bulk(failed, identifiers.len())?;
            }
        }
        Ok(())
    }
}
