//! DFD node types.

use riviere_socle::{AccessFlags, BindingRole, CompactString, SourcePos, String};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Unique node identifier within one graph (`store-1`, `process-2`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct NodeId(CompactString);

impl NodeId {
    #[inline]
    pub fn new(id: impl Into<CompactString>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<CompactString> for NodeId {
    fn from(id: CompactString) -> Self {
        Self(id)
    }
}

/// DFD node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    /// Data entering from outside the component (props, URL, server, context)
    #[serde(rename = "external-entity-input")]
    ExternalInput,
    /// Rendered output the component produces
    #[serde(rename = "external-entity-output")]
    ExternalOutput,
    /// Reactive state or any value at rest
    #[serde(rename = "data-store")]
    DataStore,
    /// Side-effecting or transforming activity
    #[serde(rename = "process")]
    Process,
    /// Anchor node for a subgraph, so subgraphs can be edge endpoints
    #[serde(rename = "subgraph")]
    Subgraph,
}

impl NodeKind {
    /// Id prefix used by the session's per-prefix counters.
    #[inline]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::ExternalInput => "input",
            Self::ExternalOutput => "output",
            Self::DataStore => "store",
            Self::Process => "process",
            Self::Subgraph => "subgraph",
        }
    }

    /// Stable wire name, identical to the serde rename.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExternalInput => "external-entity-input",
            Self::ExternalOutput => "external-entity-output",
            Self::DataStore => "data-store",
            Self::Process => "process",
            Self::Subgraph => "subgraph",
        }
    }
}

fn ser_access<S: Serializer>(access: &AccessFlags, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(access.as_str())
}

/// One bound variable recorded on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingRecord {
    pub name: String,
    pub role: BindingRole,
    #[serde(serialize_with = "ser_access")]
    pub access: AccessFlags,
}

impl BindingRecord {
    pub fn new(name: impl Into<String>, role: BindingRole, access: AccessFlags) -> Self {
        Self {
            name: name.into(),
            role,
            access,
        }
    }

    /// A data binding that reads the resource.
    pub fn read(name: impl Into<String>) -> Self {
        Self::new(name, BindingRole::Data, AccessFlags::READ)
    }

    /// A function binding that writes the resource.
    pub fn write(name: impl Into<String>) -> Self {
        Self::new(name, BindingRole::Function, AccessFlags::WRITE)
    }
}

/// Node metadata: typed binding records plus a free-form string bag.
///
/// The bag is a BTreeMap so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeMeta {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<BindingRecord>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<CompactString, CompactString>,
}

impl NodeMeta {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a binding; a record for the same name merges access flags and
    /// keeps the existing role. This is the resource-reuse augmentation path.
    pub fn record_binding(&mut self, record: BindingRecord) {
        if let Some(existing) = self.bindings.iter_mut().find(|b| b.name == record.name) {
            existing.access |= record.access;
            return;
        }
        self.bindings.push(record);
    }

    #[inline]
    pub fn binding(&self, name: &str) -> Option<&BindingRecord> {
        self.bindings.iter().find(|b| b.name == name)
    }

    #[inline]
    pub fn set(&mut self, key: impl Into<CompactString>, value: impl Into<CompactString>) {
        self.extra.insert(key.into(), value.into());
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(CompactString::as_str)
    }

    /// Combined access over all recorded bindings.
    pub fn access(&self) -> AccessFlags {
        self.bindings
            .iter()
            .fold(AccessFlags::empty(), |acc, b| acc | b.access)
    }

    fn is_empty(&self) -> bool {
        self.bindings.is_empty() && self.extra.is_empty()
    }
}

/// One node of the data-flow diagram.
#[derive(Debug, Clone, Serialize)]
pub struct DfdNode {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<SourcePos>,
    #[serde(skip_serializing_if = "NodeMeta::is_empty")]
    pub meta: NodeMeta,
}

impl DfdNode {
    pub fn new(id: NodeId, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            pos: None,
            meta: NodeMeta::new(),
        }
    }

    pub fn with_pos(mut self, pos: SourcePos) -> Self {
        self.pos = Some(pos);
        self
    }

    pub fn with_binding(mut self, record: BindingRecord) -> Self {
        self.meta.record_binding(record);
        self
    }

    pub fn with_meta(mut self, key: impl Into<CompactString>, value: impl Into<CompactString>) -> Self {
        self.meta.set(key, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_merge_keeps_one_record() {
        let mut meta = NodeMeta::new();
        meta.record_binding(BindingRecord::read("count"));
        meta.record_binding(BindingRecord::new(
            "count",
            BindingRole::Data,
            AccessFlags::WRITE,
        ));

        assert_eq!(meta.bindings.len(), 1);
        assert_eq!(
            meta.binding("count").unwrap().access,
            AccessFlags::READ | AccessFlags::WRITE
        );
    }

    #[test]
    fn test_combined_access() {
        let mut meta = NodeMeta::new();
        meta.record_binding(BindingRecord::read("value"));
        meta.record_binding(BindingRecord::write("setValue"));
        assert_eq!(meta.access(), AccessFlags::READ | AccessFlags::WRITE);
    }

    #[test]
    fn test_kind_prefixes() {
        assert_eq!(NodeKind::DataStore.id_prefix(), "store");
        assert_eq!(NodeKind::ExternalInput.as_str(), "external-entity-input");
    }
}
