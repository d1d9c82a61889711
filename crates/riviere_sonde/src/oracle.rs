//! Type oracle seam.
//!
//! The oracle is a best-effort bridge to whatever language service the host
//! editor runs. It may be absent entirely, and every individual query may
//! fail or hang; the classifier treats all of that as "fall back to the
//! heuristic". `TimedOracle` enforces the per-query deadline so a stuck
//! backend can never stall an analysis.

use crate::types::TypeFacts;
use riviere_socle::{BoxFuture, CompactString, FxHashMap, SourcePos};
use thiserror::Error;

/// Why a single oracle query produced no usable answer.
#[derive(Debug, Clone, Error)]
pub enum OracleError {
    #[error("type oracle is unreachable: {0}")]
    Unreachable(String),
    #[error("type oracle query timed out after {0}ms")]
    Timeout(u64),
    #[error("type oracle returned a malformed response: {0}")]
    Malformed(String),
    #[error("no type information for {property} at {file}:{pos}")]
    NoInfo {
        file: String,
        pos: SourcePos,
        property: String,
    },
}

/// Best-effort type resolution boundary.
///
/// `property` selects a member when the binding destructures an object
/// (`const { increment } = useCounter()` queries `increment`); for single
/// bindings it is the binding name itself.
pub trait TypeOracle: Send + Sync {
    fn resolve_type<'a>(
        &'a self,
        file_path: &'a str,
        pos: SourcePos,
        property: &'a str,
    ) -> BoxFuture<'a, Result<TypeFacts, OracleError>>;
}

impl<O: TypeOracle + ?Sized> TypeOracle for &O {
    fn resolve_type<'a>(
        &'a self,
        file_path: &'a str,
        pos: SourcePos,
        property: &'a str,
    ) -> BoxFuture<'a, Result<TypeFacts, OracleError>> {
        (**self).resolve_type(file_path, pos, property)
    }
}

/// Wraps an oracle with a per-query deadline.
pub struct TimedOracle<O> {
    inner: O,
    timeout_ms: u64,
}

impl<O: TypeOracle> TimedOracle<O> {
    pub fn new(inner: O, timeout_ms: u64) -> Self {
        Self { inner, timeout_ms }
    }
}

impl<O: TypeOracle> TypeOracle for TimedOracle<O> {
    fn resolve_type<'a>(
        &'a self,
        file_path: &'a str,
        pos: SourcePos,
        property: &'a str,
    ) -> BoxFuture<'a, Result<TypeFacts, OracleError>> {
        Box::pin(async move {
            let deadline = std::time::Duration::from_millis(self.timeout_ms);
            match tokio::time::timeout(deadline, self.inner.resolve_type(file_path, pos, property))
                .await
            {
                Ok(result) => result,
                Err(_) => {
                    tracing::debug!(
                        file = file_path,
                        property,
                        timeout_ms = self.timeout_ms,
                        "type oracle query timed out"
                    );
                    Err(OracleError::Timeout(self.timeout_ms))
                }
            }
        })
    }
}

/// Table-backed oracle keyed by property name.
///
/// Position-agnostic; meant for tests and for replaying a previously dumped
/// language-service session.
#[derive(Debug, Default)]
pub struct TableOracle {
    entries: FxHashMap<CompactString, TypeFacts>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, property: impl Into<CompactString>, facts: TypeFacts) -> Self {
        self.entries.insert(property.into(), facts);
        self
    }

    pub fn insert(&mut self, property: impl Into<CompactString>, facts: TypeFacts) {
        self.entries.insert(property.into(), facts);
    }
}

impl TypeOracle for TableOracle {
    fn resolve_type<'a>(
        &'a self,
        file_path: &'a str,
        pos: SourcePos,
        property: &'a str,
    ) -> BoxFuture<'a, Result<TypeFacts, OracleError>> {
        Box::pin(async move {
            self.entries
                .get(property)
                .cloned()
                .ok_or_else(|| OracleError::NoInfo {
                    file: file_path.to_string(),
                    pos,
                    property: property.to_string(),
                })
        })
    }
}

/// An oracle that always fails; stands in for a dead language service.
#[derive(Debug, Default)]
pub struct UnreachableOracle;

impl TypeOracle for UnreachableOracle {
    fn resolve_type<'a>(
        &'a self,
        _file_path: &'a str,
        _pos: SourcePos,
        _property: &'a str,
    ) -> BoxFuture<'a, Result<TypeFacts, OracleError>> {
        Box::pin(async {
            Err(OracleError::Unreachable(
                "no language service attached".to_string(),
            ))
        })
    }
}
