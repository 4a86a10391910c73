//! Container command implementation.

use std::io::Write;

use longshore_api::{ContainerDefinition, PlatformClient};
use longshore_core::{parse_envvars, parse_links, parse_ports, resolve};

use crate::cli::{ContainerCommands, RunArgs};
use crate::commands::{finish_bulk, resolve_each};
use crate::error::CliError;
use crate::output::{
    short_uuid, ContainerDetail, ContainerList, LogsOutput, Message, OutputFormat,
};

/// Container command executor.
pub struct ContainerCommand<'a> {
    client: &'a PlatformClient,
}

impl<'a> ContainerCommand<'a> {
    /// Create a new container command.
    #[must_use]
    pub fn new(client: &'a PlatformClient) -> Self {
        Self { client }
    }

    /// Execute a container subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &ContainerCommands,
    ) -> Result<(), CliError> {
        let containers = self.client.containers();
        match command {
            ContainerCommands::Ps => {
                let list = containers.list_all().await?;
                format.write(writer, &ContainerList { containers: list })?;
            }
            ContainerCommands::Inspect { identifier } => {
                let container = resolve(&containers, identifier).await?;
                format.write(writer, &ContainerDetail { container })?;
            }
            ContainerCommands::Run(args) => {
                let definition = build_definition(args)?;
                let container = containers.run(&definition).await?;
                format.write(
                    writer,
                    &Message::success(format!(
                        "container {} ({}) deployed",
                        container.name,
                        short_uuid(&container.uuid)
                    )),
                )?;
            }
            ContainerCommands::Start { identifiers } => {
                let (resolved, failed) = resolve_each(&containers, identifiers).await?;
                for container in resolved {
                    containers.start(&container.uuid).await?;
                    format.write(
                        writer,
                        &Message::success(format!("container {} starting", container.name)),
                    )?;
                }
                finish_bulk(failed, identifiers.len())?;
            }
            ContainerCommands::Stop { identifiers } => {
                let (resolved, failed) = resolve_each(&containers, identifiers).await?;
                for container in resolved {
                    containers.stop(&container.uuid).await?;
                    format.write(
                        writer,
                        &Message::success(format!("container {} stopping", container.name)),
                    )?;
                }
                finish_bulk(failed, identifiers.len())?;
            }
            ContainerCommands::Terminate { identifiers } => {
                let (resolved, failed) = resolve_each(&containers, identifiers).await?;
                for container in resolved {
                    containers.terminate(&container.uuid).await?;
                    format.write(
                        writer,
                        &Message::success(format!("container {} terminating", container.name)),
                    )?;
                }
                finish_bulk(failed, identifiers.len())?;
            }
            ContainerCommands::Logs { identifier } => {
                let container = resolve(&containers, identifier).await?;
                let logs = containers.logs(&container.uuid).await?;
                format.write(writer, &LogsOutput { logs })?;
            }
        }
        Ok(())
    }
}

/// Validate the run arguments' spec strings and assemble the create
/// payload. Parsing is all-or-nothing, so nothing reaches the wire when
/// any entry is malformed.
fn build_definition(args: &RunArgs) -> Result<ContainerDefinition, CliError> {
    Ok(ContainerDefinition {
        image: args.image.clone(),
        name: args.name.clone(),
        run_command: if args.command.is_empty() {
            None
        } else {
            Some(args.command.join(" "))
        },
        entrypoint: args.entrypoint.clone(),
        container_ports: parse_ports(&args.publish)?,
        container_envvars: parse_envvars(&args.env)?,
        linked_to_container: parse_links(&args.link, "to_container")?,
    })
}
