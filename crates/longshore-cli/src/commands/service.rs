//! Service command implementation.

use std::io::Write;

use longshore_api::{PlatformClient, ServiceDefinition};
use longshore_core::{parse_envvars, parse_links, parse_ports, resolve};

use crate::cli::{ServiceCommands, ServiceRunArgs};
use crate::commands::{finish_bulk, resolve_each};
use crate::error::CliError;
use crate::output::{short_uuid, LogsOutput, Message, OutputFormat, ServiceDetail, ServiceList};

/// Service command executor.
pub struct ServiceCommand<'a> {
    client: &'a PlatformClient,
}

impl<'a> ServiceCommand<'a> {
    /// Create a new service command.
    #[must_use]
    pub fn new(client: &'a PlatformClient) -> Self {
        Self { client }
    }

    /// Execute a service subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &ServiceCommands,
    ) -> Result<(), CliError> {
        let services = self.client.services();
        match command {
            ServiceCommands::Ps => {
                let list = services.list_all().await?;
                format.write(writer, &ServiceList { services: list })?;
            }
            ServiceCommands::Inspect { identifier } => {
                let service = resolve(&services, identifier).await?;
                format.write(writer, &ServiceDetail { service })?;
            }
            ServiceCommands::Run(args) => {
                let definition = build_definition(args)?;
                let service = services.run(&definition).await?;
                format.write(
                    writer,
                    &Message::success(format!(
                        "service {} ({}) deployed",
                        service.name,
                        short_uuid(&service.uuid)
                    )),
                )?;
            }
            ServiceCommands::Scale { identifier, target } => {
                let service = resolve(&services, identifier).await?;
                services.scale(&service.uuid, *target).await?;
                format.write(
                    writer,
                    &Message::success(format!(
                        "service {} scaling to {target} containers",
                        service.name
                    )),
                )?;
            }
            ServiceCommands::Start { identifiers } => {
                let (resolved, failed) = resolve_each(&services, identifiers).await?;
                for service in resolved {
                    services.start(&service.uuid).await?;
                    format.write(
                        writer,
                        &Message::success(format!("service {} starting", service.name)),
                    )?;
                }
                finish_bulk(failed, identifiers.len())?;
            }
            ServiceCommands::Stop { identifiers } => {
                let (resolved, failed) = resolve_each(&services, identifiers).await?;
                for service in resolved {
                    services.stop(&service.uuid).await?;
                    format.write(
                        writer,
                        &Message::success(format!("service {} stopping", service.name)),
                    )?;
                }
                finish_bulk(failed, identifiers.len())?;
            }
            ServiceCommands::Terminate { identifiers } => {
                let (resolved, failed) = resolve_each(&services, identifiers).await?;
                for service in resolved {
                    services.terminate(&service.uuid).await?;
                    format.write(
                        writer,
                        &Message::success(format!("service {} terminating", service.name)),
                    )?;
                }
                finish_bulk(failed, identifiers.len())?;
            }
            ServiceCommands::Logs { identifier } => {
                let service = resolve(&services, identifier).await?;
                let logs = services.logs(&service.uuid).await?;
                format.write(writer, &LogsOutput { logs })?;
            }
        }
        Ok(())
    }
}

fn build_definition(args: &ServiceRunArgs) -> Result<ServiceDefinition, CliError> {
    Ok(ServiceDefinition {
        image: args.run.image.clone(),
        name: args.run.name.clone(),
        run_command: if args.run.command.is_empty() {
            None
        } else {
            Some(args.run.command.join(" "))
        },
        entrypoint: args.run.entrypoint.clone(),
        container_ports: parse_ports(&args.run.publish)?,
        container_envvars: parse_envvars(&args.run.env)?,
        linked_to_service: parse_links(&args.run.link, "to_service")?,
        target_num_containers: Some(args.target_num_containers),
    })
}
