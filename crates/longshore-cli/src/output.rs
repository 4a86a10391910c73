//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats. List tables use
//! 8-character short UUIDs and humanized timestamps; detail views are
//! key/value blocks. JSON mode serializes the platform models verbatim.

use std::io::Write;

use chrono::{DateTime, Utc};
use longshore_api::{Container, Node, NodeCluster, Service};
use serde::Serialize;
use uuid::Uuid;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Prefix a lifecycle state with its glyph. Unknown states pass through
/// unchanged.
#[must_use]
pub fn decorate_state(state: &str) -> String {
    match state_symbol(state) {
        Some(symbol) => format!("{symbol} {state}"),
        None => state.to_string(),
    }
}

fn state_symbol(state: &str) -> Option<&'static str> {
    match state {
        "Running" | "Partly running" => Some("▶"),
        "Init" | "Stopped" => Some("◼"),
        "Starting" | "Stopping" | "Scaling" | "Terminating" => Some("⚙"),
        "Start failed" | "Stopped with errors" => Some("!"),
        "Terminated" => Some("✘"),
        _ => None,
    }
}

/// First 8 characters of a UUID, as list tables show it.
#[must_use]
pub fn short_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

/// Humanize a timestamp relative to now: "3 hours ago", "in 3 hours", or
/// an empty string when the timestamp is absent.
#[must_use]
pub fn humanize(timestamp: Option<DateTime<Utc>>) -> String {
    humanize_at(timestamp, Utc::now())
}

fn humanize_at(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = timestamp else {
        return String::new();
    };
    if ts <= now {
        format!("{} ago", span(now - ts))
    } else {
        format!("in {}", span(ts - now))
    }
}

fn span(duration: chrono::Duration) -> String {
    let secs = duration.num_seconds();
    if secs < 60 {
        plural(secs, "second")
    } else if secs < 3600 {
        plural(secs / 60, "minute")
    } else if secs < 86400 {
        plural(secs / 3600, "hour")
    } else {
        plural(secs / 86400, "day")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

fn ports_column(container: &Container) -> String {
    container
        .container_ports
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// List of containers for display.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ContainerList {
    /// Containers to render.
    pub containers: Vec<Container>,
}

impl TableDisplay for ContainerList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.containers.is_empty() {
            writeln!(writer, "No containers")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<20}  {:<8}  {:<22}  {:<24}  {:<16}  {}",
            "NAME", "UUID", "STATUS", "IMAGE", "DEPLOYED", "PORTS"
        )?;
        for container in &self.containers {
            writeln!(
                writer,
                "{:<20}  {:<8}  {:<22}  {:<24}  {:<16}  {}",
                container.name,
                short_uuid(&container.uuid),
                decorate_state(&container.state),
                container.image_name,
                humanize(container.deployed),
                ports_column(container),
            )?;
        }
        Ok(())
    }
}

/// List of services for display.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ServiceList {
    /// Services to render.
    pub services: Vec<Service>,
}

impl TableDisplay for ServiceList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.services.is_empty() {
            writeln!(writer, "No services")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<20}  {:<8}  {:<22}  {:<24}  {:<16}  {}",
            "NAME", "UUID", "STATUS", "IMAGE", "DEPLOYED", "CONTAINERS"
        )?;
        for service in &self.services {
            writeln!(
                writer,
                "{:<20}  {:<8}  {:<22}  {:<24}  {:<16}  {}/{}",
                service.name,
                short_uuid(&service.uuid),
                decorate_state(&service.state),
                service.image_name,
                humanize(service.deployed),
                service.current_num_containers,
                service.target_num_containers,
            )?;
        }
        Ok(())
    }
}

/// List of nodes for display.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct NodeList {
    /// Nodes to render.
    pub nodes: Vec<Node>,
}

impl TableDisplay for NodeList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.nodes.is_empty() {
            writeln!(writer, "No nodes")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<8}  {:<40}  {:<22}  {}",
            "UUID", "FQDN", "STATUS", "LAST SEEN"
        )?;
        for node in &self.nodes {
            writeln!(
                writer,
                "{:<8}  {:<40}  {:<22}  {}",
                short_uuid(&node.uuid),
                node.external_fqdn.as_deref().unwrap_or(""),
                decorate_state(&node.state),
                humanize(node.last_seen),
            )?;
        }
        Ok(())
    }
}

/// List of node clusters for display.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct NodeClusterList {
    /// Clusters to render.
    pub clusters: Vec<NodeCluster>,
}

impl TableDisplay for NodeClusterList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.clusters.is_empty() {
            writeln!(writer, "No node clusters")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<20}  {:<8}  {:<22}  {:<10}  {:<10}  {:<6}  {}",
            "NAME", "UUID", "STATUS", "REGION", "TYPE", "NODES", "DEPLOYED"
        )?;
        for cluster in &self.clusters {
            writeln!(
                writer,
                "{:<20}  {:<8}  {:<22}  {:<10}  {:<10}  {:<6}  {}",
                cluster.name,
                short_uuid(&cluster.uuid),
                decorate_state(&cluster.state),
                cluster.region.as_deref().unwrap_or(""),
                cluster.node_type.as_deref().unwrap_or(""),
                format!(
                    "{}/{}",
                    cluster.current_num_nodes, cluster.target_num_nodes
                ),
                humanize(cluster.deployed),
            )?;
        }
        Ok(())
    }
}

/// Detailed view of one container.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ContainerDetail {
    /// The container to render.
    pub container: Container,
}

impl TableDisplay for ContainerDetail {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let c = &self.container;
        writeln!(writer, "Uuid:         {}", c.uuid)?;
        writeln!(writer, "Name:         {}", c.name)?;
        writeln!(writer, "State:        {}", decorate_state(&c.state))?;
        writeln!(writer, "Image:        {}", c.image_name)?;
        if let Some(command) = &c.run_command {
            writeln!(writer, "Run command:  {command}")?;
        }
        if !c.container_ports.is_empty() {
            writeln!(writer, "Ports:        {}", ports_column(c))?;
        }
        writeln!(writer, "Deployed:     {}", humanize(c.deployed))?;
        if let Some(code) = c.exit_code {
            writeln!(writer, "Exit code:    {code}")?;
        }
        Ok(())
    }
}

/// Detailed view of one service.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ServiceDetail {
    /// The service to render.
    pub service: Service,
}

impl TableDisplay for ServiceDetail {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let s = &self.service;
        writeln!(writer, "Uuid:         {}", s.uuid)?;
        writeln!(writer, "Name:         {}", s.name)?;
        writeln!(writer, "State:        {}", decorate_state(&s.state))?;
        writeln!(writer, "Image:        {}", s.image_name)?;
        writeln!(
            writer,
            "Containers:   {}/{}",
            s.current_num_containers, s.target_num_containers
        )?;
        writeln!(writer, "Deployed:     {}", humanize(s.deployed))?;
        Ok(())
    }
}

/// Detailed view of one node.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct NodeDetail {
    /// The node to render.
    pub node: Node,
}

impl TableDisplay for NodeDetail {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let n = &self.node;
        writeln!(writer, "Uuid:         {}", n.uuid)?;
        writeln!(writer, "State:        {}", decorate_state(&n.state))?;
        if let Some(fqdn) = &n.external_fqdn {
            writeln!(writer, "FQDN:         {fqdn}")?;
        }
        writeln!(writer, "Last seen:    {}", humanize(n.last_seen))?;
        Ok(())
    }
}

/// Detailed view of one node cluster.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct NodeClusterDetail {
    /// The cluster to render.
    pub cluster: NodeCluster,
}

impl TableDisplay for NodeClusterDetail {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let c = &self.cluster;
        writeln!(writer, "Uuid:         {}", c.uuid)?;
        writeln!(writer, "Name:         {}", c.name)?;
        writeln!(writer, "State:        {}", decorate_state(&c.state))?;
        if let Some(region) = &c.region {
            writeln!(writer, "Region:       {region}")?;
        }
        if let Some(node_type) = &c.node_type {
            writeln!(writer, "Node type:    {node_type}")?;
        }
        writeln!(
            writer,
            "Nodes:        {}/{}",
            c.current_num_nodes, c.target_num_nodes
        )?;
        writeln!(writer, "Deployed:     {}", humanize(c.deployed))?;
        Ok(())
    }
}

/// Stored log tail of a container or service.
#[derive(Debug, Clone, Serialize)]
pub struct LogsOutput {
    /// Raw log text.
    pub logs: String,
}

impl TableDisplay for LogsOutput {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        write!(writer, "{}", self.logs)?;
        if !self.logs.ends_with('\n') {
            writeln!(writer)?;
        }
        Ok(())
    }
}

/// Simple message output.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Message text.
    pub message: String,
}

impl Message {
    /// Create a success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl TableDisplay for Message {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "✓ {}", self.message)?;
        Ok(())
    }
}
