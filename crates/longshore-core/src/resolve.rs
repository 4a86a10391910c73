//! Remote identifier resolution.
//!
//! Takes an ambiguous user-supplied token (full UUID, short UUID, or name)
//! and resolves it against a remote collection to exactly one object, or a
//! typed failure. The remote collection is abstracted behind
//! [`ResourceLookup`] so command handlers and tests can inject their own.

use std::fmt;

use thiserror::Error;

use crate::ident::is_uuid4;

/// The four kinds of remote objects an identifier can resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A single container.
    Container,
    /// A service (a set of containers run from one definition).
    Service,
    /// A worker node.
    Node,
    /// A cluster of worker nodes.
    NodeCluster,
}

impl ResourceKind {
    /// Whether tokens of this kind may also be resolved by exact name.
    ///
    /// Nodes are addressed by identifier only.
    #[must_use]
    pub const fn supports_name_lookup(self) -> bool {
        !matches!(self, Self::Node)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = match self {
            Self::Container => "container",
            Self::Service => "service",
            Self::Node => "node",
            Self::NodeCluster => "node cluster",
        };
        f.write_str(noun)
    }
}

/// Filter accepted by the remote list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFilter<'a> {
    /// Match objects whose identifier starts with the given prefix.
    UuidPrefix(&'a str),
    /// Match objects whose name equals the given string exactly.
    Name(&'a str),
}

/// Remote collection the resolver queries.
///
/// `fetch_by_uuid` reports "no such object" as `Ok(None)`; `Err` is
/// reserved for remote-layer failures, which the resolver passes through
/// untouched in both resolution modes.
pub trait ResourceLookup: Send + Sync {
    /// The remote object handle.
    type Object: Send;
    /// The remote-layer error type.
    type Error: Send;

    /// The resource kind this collection holds.
    fn kind(&self) -> ResourceKind;

    /// Fetch a single object by its full identifier.
    fn fetch_by_uuid(
        &self,
        uuid: &str,
    ) -> impl std::future::Future<Output = Result<Option<Self::Object>, Self::Error>> + Send;

    /// List objects matching a filter.
    fn list(
        &self,
        filter: LookupFilter<'_>,
    ) -> impl std::future::Future<Output = Result<Vec<Self::Object>, Self::Error>> + Send;
}

/// A resolution outcome that identifies no single object.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveFailure {
    /// No object matched the token.
    #[error("identifier '{token}' does not match any {kind}")]
    NotFound {
        /// The kind that was queried.
        kind: ResourceKind,
        /// The token that failed to resolve.
        token: String,
    },
    /// More than one object matched the token.
    #[error("identifier '{token}' matches {count} {kind}s, use the full UUID")]
    Ambiguous {
        /// The kind that was queried.
        kind: ResourceKind,
        /// The token that failed to resolve.
        token: String,
        /// How many objects matched.
        count: usize,
    },
}

/// Error returned by strict resolution.
///
/// Remote-layer errors keep their own type and are never reinterpreted as
/// not-found or ambiguous outcomes.
#[derive(Debug, Error)]
pub enum ResolveError<E> {
    /// The token did not identify exactly one object.
    #[error(transparent)]
    Failed(#[from] ResolveFailure),
    /// The remote layer itself failed.
    #[error(transparent)]
    Api(E),
}

/// Outcome of a quiet resolution: the object, or the failure as a value.
#[derive(Debug)]
pub enum Resolution<T> {
    /// Exactly one object matched.
    Found(T),
    /// The token matched zero or several objects.
    Failed(ResolveFailure),
}

impl<T> Resolution<T> {
    /// The resolved object, if there was exactly one.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(object) => Some(object),
            Self::Failed(_) => None,
        }
    }
}

/// Resolve a user-supplied token to exactly one remote object.
///
/// Full identifiers go straight to the fetch operation. Anything else is
/// treated as an identifier prefix first and, for kinds that support it,
/// an exact name second. A single prefix match wins outright and skips the
/// name query entirely.
///
/// # Errors
///
/// Returns [`ResolveError::Failed`] when the token matches zero or several
/// objects, and [`ResolveError::Api`] when the remote layer fails.
pub async fn resolve<L>(lookup: &L, token: &str) -> Result<L::Object, ResolveError<L::Error>>
where
    L: ResourceLookup,
{
    let kind = lookup.kind();

    if is_uuid4(token) {
        let fetched = lookup
            .fetch_by_uuid(token)
            .await
            .map_err(ResolveError::Api)?;
        return match fetched {
            Some(object) => Ok(object),
            None => Err(ResolveFailure::NotFound {
                kind,
                token: token.to_string(),
            }
            .into()),
        };
    }

    let mut matches = lookup
        .list(LookupFilter::UuidPrefix(token))
        .await
        .map_err(ResolveError::Api)?;

    if matches.len() != 1 && kind.supports_name_lookup() {
        let by_name = lookup
            .list(LookupFilter::Name(token))
            .await
            .map_err(ResolveError::Api)?;
        matches.extend(by_name);
    }

    match matches.len() {
        0 => Err(ResolveFailure::NotFound {
            kind,
            token: token.to_string(),
        }
        .into()),
        1 => Ok(matches.swap_remove(0)),
        count => Err(ResolveFailure::Ambiguous {
            kind,
            token: token.to_string(),
            count,
        }
        .into()),
    }
}

/// Resolve like [`resolve`], but hand not-found and ambiguous outcomes back
/// as values so bulk commands can keep processing the remaining tokens.
/// Remote-layer errors still surface as `Err`.
///
/// # Errors
///
/// Returns `Err` only when the remote layer fails.
pub async fn resolve_quiet<L>(lookup: &L, token: &str) -> Result<Resolution<L::Object>, L::Error>
where
    L: ResourceLookup,
{
    match resolve(lookup, token).await {
        Ok(object) => Ok(Resolution::Found(object)),
        Err(ResolveError::Failed(failure)) => Ok(Resolution::Failed(failure)),
        Err(ResolveError::Api(err)) => Err(err),
    }
}
