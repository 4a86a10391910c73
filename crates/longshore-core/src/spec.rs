//! Compact CLI spec-string parsing.
//!
//! Operators hand the CLI dense notations for ports (`[HOST:]PORT[/PROTO]`),
//! links (`TARGET:ALIAS`), and environment variables (`KEY=VALUE`). The
//! parsers here validate those notations and produce the structured records
//! the platform API expects. Parsing is all-or-nothing per call: the first
//! malformed entry aborts the whole list with a [`BadParameter`] naming it.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::error::BadParameter;

/// A port field must be purely numeric.
static PORT_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap_or_else(|_| unreachable!()));

/// An environment variable key must be identifier-shaped.
static ENV_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap_or_else(|_| unreachable!()));

/// An environment variable value must be non-empty and free of `=`, `!`, `?`.
static ENV_VALUE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^=!?]+$").unwrap_or_else(|_| unreachable!()));

/// Transport protocol of a published port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// TCP, the default when a port spec carries no protocol suffix.
    #[default]
    Tcp,
    /// UDP.
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => f.write_str("tcp"),
            Self::Udp => f.write_str("udp"),
        }
    }
}

/// Error parsing a protocol name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown protocol '{0}', expected tcp or udp")]
pub struct ProtocolParseError(String);

impl FromStr for Protocol {
    type Err = ProtocolParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            other => Err(ProtocolParseError(other.to_string())),
        }
    }
}

/// A parsed `[HOST:]PORT[/PROTO]` port specification.
///
/// `outer_port` is absent for ports that are exposed but not published;
/// serialization omits the key entirely in that case, matching the wire
/// format the platform expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    /// Transport protocol.
    pub protocol: Protocol,
    /// Port inside the container.
    pub inner_port: String,
    /// Published host port, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_port: Option<String>,
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(outer) = &self.outer_port {
            write!(f, "{outer}:")?;
        }
        write!(f, "{}/{}", self.inner_port, self.protocol)
    }
}

/// A parsed `TARGET:ALIAS` link specification.
///
/// The platform wire format keys the target by a caller-supplied role
/// (`to_container` for container links, `to_service` for service links), so
/// serialization is hand-written: `{<role>: target, "name": alias}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    /// Wire key under which the target is sent.
    pub role: String,
    /// Name of the object being linked to.
    pub target: String,
    /// Alias the link is exposed under.
    pub name: String,
}

impl Serialize for LinkSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(&self.role, &self.target)?;
        map.serialize_entry("name", &self.name)?;
        map.end()
    }
}

impl fmt::Display for LinkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target, self.name)
    }
}

/// A parsed `KEY=VALUE` environment variable specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVarSpec {
    /// Variable name.
    pub key: String,
    /// Variable value.
    pub value: String,
}

impl fmt::Display for EnvVarSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Parse a list of `[HOST:]PORT[/PROTO]` entries, preserving input order.
///
/// The protocol suffix defaults to `tcp`. Both port fields must be purely
/// numeric.
///
/// # Errors
///
/// Returns [`BadParameter`] naming the first malformed entry; no partial
/// result is produced.
pub fn parse_ports<S: AsRef<str>>(entries: &[S]) -> Result<Vec<PortSpec>, BadParameter> {
    entries
        .iter()
        .map(|entry| parse_port(entry.as_ref()))
        .collect()
}

fn parse_port(entry: &str) -> Result<PortSpec, BadParameter> {
    if entry.is_empty() {
        return Err(BadParameter::empty("port"));
    }

    let (ports, protocol) = match entry.split_once('/') {
        None => (entry, Protocol::Tcp),
        Some((ports, proto)) => {
            let protocol = proto
                .parse()
                .map_err(|_| BadParameter::unknown_protocol("port", entry, proto))?;
            (ports, protocol)
        }
    };

    let (outer_port, inner_port) = match ports.split_once(':') {
        None => (None, ports),
        Some((_, inner)) if inner.contains(':') => {
            return Err(BadParameter::invalid_format(
                "port",
                entry,
                "[HOST:]PORT[/PROTOCOL]",
            ));
        }
        Some((outer, inner)) => (Some(outer), inner),
    };

    for port in outer_port.iter().chain(std::iter::once(&inner_port)) {
        if !PORT_NUMBER_REGEX.is_match(port) {
            return Err(BadParameter::non_numeric_port("port", entry, *port));
        }
    }

    Ok(PortSpec {
        protocol,
        inner_port: inner_port.to_string(),
        outer_port: outer_port.map(String::from),
    })
}

/// Parse a list of `TARGET:ALIAS` link entries, preserving input order.
///
/// `role` is the wire key the targets are sent under (for example
/// `to_container`).
///
/// # Errors
///
/// Returns [`BadParameter`] naming the first malformed entry; no partial
/// result is produced.
pub fn parse_links<S: AsRef<str>>(entries: &[S], role: &str) -> Result<Vec<LinkSpec>, BadParameter> {
    entries
        .iter()
        .map(|entry| parse_link(entry.as_ref(), role))
        .collect()
}

fn parse_link(entry: &str, role: &str) -> Result<LinkSpec, BadParameter> {
    if entry.is_empty() {
        return Err(BadParameter::empty("link"));
    }

    let mut parts = entry.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(target), Some(name), None) if !target.is_empty() && !name.is_empty() => {
            Ok(LinkSpec {
                role: role.to_string(),
                target: target.to_string(),
                name: name.to_string(),
            })
        }
        _ => Err(BadParameter::invalid_format("link", entry, "TARGET:ALIAS")),
    }
}

/// Parse a list of `KEY=VALUE` environment variable entries, preserving
/// input order.
///
/// Keys must be identifier-shaped (letter or underscore first, then
/// letters/digits/underscores). Values must be non-empty and must not
/// contain `=`, `!`, or `?`.
///
/// # Errors
///
/// Returns [`BadParameter`] naming the first malformed entry; no partial
/// result is produced.
pub fn parse_envvars<S: AsRef<str>>(entries: &[S]) -> Result<Vec<EnvVarSpec>, BadParameter> {
    entries
        .iter()
        .map(|entry| parse_envvar(entry.as_ref()))
        .collect()
}

fn parse_envvar(entry: &str) -> Result<EnvVarSpec, BadParameter> {
    if entry.is_empty() {
        return Err(BadParameter::empty("env"));
    }

    let Some((key, value)) = entry.split_once('=') else {
        return Err(BadParameter::invalid_format("env", entry, "KEY=VALUE"));
    };

    if !ENV_KEY_REGEX.is_match(key) {
        return Err(BadParameter::invalid_key("env", entry, key));
    }
    if !ENV_VALUE_REGEX.is_match(value) {
        return Err(BadParameter::invalid_value("env", entry, value));
    }

    Ok(EnvVarSpec {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BadParameterKind;
    use test_case::test_case;

    // ===================
    // Ports
    // ===================

    #[test]
    fn plain_port_defaults_to_tcp() {
        let specs = parse_ports(&["80"]).expect("should parse");
        assert_eq!(
            specs,
            vec![PortSpec {
                protocol: Protocol::Tcp,
                inner_port: "80".into(),
                outer_port: None,
            }]
        );
    }

    #[test]
    fn port_with_protocol_suffix() {
        let specs = parse_ports(&["53/udp"]).expect("should parse");
        assert_eq!(specs[0].protocol, Protocol::Udp);
        assert_eq!(specs[0].inner_port, "53");
        assert_eq!(specs[0].outer_port, None);
    }

    #[test]
    fn published_port() {
        let specs = parse_ports(&["3307:3306"]).expect("should parse");
        assert_eq!(
            specs,
            vec![PortSpec {
                protocol: Protocol::Tcp,
                inner_port: "3306".into(),
                outer_port: Some("3307".into()),
            }]
        );
    }

    #[test]
    fn published_port_with_protocol() {
        let specs = parse_ports(&["8083:8080/udp"]).expect("should parse");
        assert_eq!(
            specs,
            vec![PortSpec {
                protocol: Protocol::Udp,
                inner_port: "8080".into(),
                outer_port: Some("8083".into()),
            }]
        );
    }

    #[test]
    fn ports_preserve_input_order() {
        let specs =
            parse_ports(&["80", "53/udp", "3307:3306", "8083:8080/udp"]).expect("should parse");
        let rendered: Vec<String> = specs.iter().map(|s| s.inner_port.clone()).collect();
        assert_eq!(rendered, vec!["80", "53", "3306", "8080"]);
    }

    #[test_case("abc" ; "non numeric inner")]
    #[test_case("abc:80" ; "non numeric outer")]
    #[test_case("80:abc" ; "non numeric inner with outer")]
    #[test_case("80:80:abc" ; "extra colon field")]
    #[test_case("80:80/abc" ; "bad protocol")]
    #[test_case("80/80:tcp" ; "protocol before colon")]
    #[test_case("" ; "empty entry")]
    #[test_case("80/tcp/udp" ; "double protocol")]
    fn malformed_ports_are_rejected(entry: &str) {
        let err = parse_ports(&[entry]).expect_err("should reject");
        assert_eq!(err.token, entry);
    }

    #[test]
    fn one_bad_port_voids_the_whole_parse() {
        let err = parse_ports(&["80", "abc", "443"]).expect_err("should reject");
        assert_eq!(err.token, "abc");
        assert!(matches!(err.kind, BadParameterKind::NonNumericPort { .. }));
    }

    #[test]
    fn unpublished_port_has_no_outer_port_key() {
        let specs = parse_ports(&["80"]).expect("should parse");
        let json = serde_json::to_value(&specs[0]).expect("should serialize");
        assert_eq!(
            json,
            serde_json::json!({"protocol": "tcp", "inner_port": "80"})
        );
    }

    #[test]
    fn published_port_wire_shape() {
        let specs = parse_ports(&["3307:3306"]).expect("should parse");
        let json = serde_json::to_value(&specs[0]).expect("should serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "protocol": "tcp",
                "inner_port": "3306",
                "outer_port": "3307",
            })
        );
    }

    #[test]
    fn port_display_round_trips() {
        for entry in ["80", "53/udp", "3307:3306", "8083:8080/udp"] {
            let parsed = parse_ports(&[entry]).expect("should parse");
            let reparsed = parse_ports(&[parsed[0].to_string()]).expect("should reparse");
            assert_eq!(parsed, reparsed);
        }
    }

    // ===================
    // Links
    // ===================

    #[test]
    fn links_carry_the_role_key() {
        let specs = parse_links(&["mysql:db1", "mariadb:db2"], "to_container")
            .expect("should parse");
        assert_eq!(
            specs,
            vec![
                LinkSpec {
                    role: "to_container".into(),
                    target: "mysql".into(),
                    name: "db1".into(),
                },
                LinkSpec {
                    role: "to_container".into(),
                    target: "mariadb".into(),
                    name: "db2".into(),
                },
            ]
        );
    }

    #[test]
    fn link_wire_shape_uses_dynamic_role_key() {
        let specs = parse_links(&["mysql:db1"], "to_service").expect("should parse");
        let json = serde_json::to_value(&specs[0]).expect("should serialize");
        assert_eq!(
            json,
            serde_json::json!({"to_service": "mysql", "name": "db1"})
        );
    }

    #[test_case("mysql" ; "missing separator")]
    #[test_case("mysql:mysql:mysql" ; "two separators")]
    #[test_case("" ; "empty entry")]
    #[test_case(":db1" ; "empty target")]
    #[test_case("mysql:" ; "empty alias")]
    fn malformed_links_are_rejected(entry: &str) {
        let err = parse_links(&[entry], "to_container").expect_err("should reject");
        assert_eq!(err.token, entry);
    }

    #[test]
    fn one_bad_link_voids_the_whole_parse() {
        let err =
            parse_links(&["mysql:db1", "mariadb"], "to_container").expect_err("should reject");
        assert_eq!(err.token, "mariadb");
    }

    #[test]
    fn link_display_round_trips() {
        let parsed = parse_links(&["mysql:db1"], "to_container").expect("should parse");
        let reparsed =
            parse_links(&[parsed[0].to_string()], "to_container").expect("should reparse");
        assert_eq!(parsed, reparsed);
    }

    // ===================
    // Environment variables
    // ===================

    #[test]
    fn envvars_split_on_the_first_equals() {
        let specs =
            parse_envvars(&["MYSQL_USER=admin", "MYSQL_PASS=mypass"]).expect("should parse");
        assert_eq!(
            specs,
            vec![
                EnvVarSpec {
                    key: "MYSQL_USER".into(),
                    value: "admin".into(),
                },
                EnvVarSpec {
                    key: "MYSQL_PASS".into(),
                    value: "mypass".into(),
                },
            ]
        );
    }

    #[test]
    fn underscore_leading_key_is_accepted() {
        let specs = parse_envvars(&["_PRIVATE=1"]).expect("should parse");
        assert_eq!(specs[0].key, "_PRIVATE");
    }

    #[test_case("MYSQL_ADMIN" ; "missing equals")]
    #[test_case("1MYSQL_ADMIN=mypass" ; "digit leading key")]
    #[test_case("MYSQL_ADMIN==mypass" ; "value starts with equals")]
    #[test_case("MYSQL_ADMIN=m!ypass" ; "value contains bang")]
    #[test_case("MYSQL_ADMIN=my?pass" ; "value contains question mark")]
    #[test_case("MYSQL_ADMIN=mypass=113" ; "value contains equals")]
    #[test_case("MYSQL_ADMIN=" ; "empty value")]
    #[test_case("" ; "empty entry")]
    #[test_case("MY-KEY=value" ; "dash in key")]
    fn malformed_envvars_are_rejected(entry: &str) {
        let err = parse_envvars(&[entry]).expect_err("should reject");
        assert_eq!(err.token, entry);
    }

    #[test]
    fn one_bad_envvar_voids_the_whole_parse() {
        let err = parse_envvars(&["GOOD=1", "BAD="]).expect_err("should reject");
        assert_eq!(err.token, "BAD=");
        assert!(matches!(err.kind, BadParameterKind::InvalidValue { .. }));
    }

    #[test]
    fn envvar_display_round_trips() {
        let parsed = parse_envvars(&["MYSQL_USER=admin"]).expect("should parse");
        let reparsed = parse_envvars(&[parsed[0].to_string()]).expect("should reparse");
        assert_eq!(parsed, reparsed);
    }

    #[test]
    fn envvar_wire_shape() {
        let specs = parse_envvars(&["MYSQL_USER=admin"]).expect("should parse");
        let json = serde_json::to_value(&specs[0]).expect("should serialize");
        assert_eq!(
            json,
            serde_json::json!({"key": "MYSQL_USER", "value": "admin"})
        );
    }
}
