//! Atomic-state definitions.
//!
//! Atomic-state libraries (Jotai, Recoil) define state outside the component:
//! `const countAtom = atom(0)`. A static scanner pass over the module
//! collects these before dispatch so the atom processors can tell plain atoms
//! from derived ones and draw derivation edges.

use riviere_socle::String;
use serde::{Deserialize, Serialize};

/// One statically scanned atom definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomDefinition {
    /// Variable name the atom is bound to; this is the resource key.
    pub name: String,
    /// Whether the atom derives from others (`atom((get) => ...)`).
    #[serde(default)]
    pub derived: bool,
    /// Atom names referenced inside the defining closure.
    #[serde(default)]
    pub deps: Vec<String>,
}

impl AtomDefinition {
    /// A plain value atom.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            derived: false,
            deps: Vec::new(),
        }
    }

    /// A derived atom with its closure dependencies.
    pub fn derived(name: impl Into<String>, deps: Vec<String>) -> Self {
        Self {
            name: name.into(),
            derived: true,
            deps,
        }
    }
}
