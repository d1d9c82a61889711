//! Shared role vocabulary.
//!
//! Both sides of the pipeline speak in these terms: the extractor guesses a
//! role per prop, the classifier assigns one per bound variable, and graph
//! nodes record them per binding together with how the binding touches the
//! resource (read, write, or both).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Role of a bound variable in the data-flow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingRole {
    /// A value read for display or computation
    Data,
    /// A callable that triggers a process
    Function,
}

impl BindingRole {
    #[inline]
    pub const fn is_function(self) -> bool {
        matches!(self, Self::Function)
    }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Function => "function",
        }
    }
}

bitflags! {
    /// How a binding touches the resource behind its node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AccessFlags: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
    }
}

impl AccessFlags {
    /// Short display form: `r`, `w`, or `rw`.
    pub const fn as_str(self) -> &'static str {
        match (self.contains(Self::READ), self.contains(Self::WRITE)) {
            (true, true) => "rw",
            (true, false) => "r",
            (false, true) => "w",
            (false, false) => "-",
        }
    }
}
