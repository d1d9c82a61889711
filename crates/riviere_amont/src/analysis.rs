//! Per-component analysis facts.
//!
//! `ComponentAnalysis` is the contract between the framework extractor and
//! the data-flow pipeline: one instance per source file, produced once,
//! never mutated afterwards.

use crate::hook::HookInvocation;
use crate::render::RenderNode;
use riviere_socle::String;
use serde::{Deserialize, Serialize};

/// Source dialect the component was written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    /// React function components with hooks
    React,
    /// Vue 3 Composition API (`<script setup>` or `setup()`)
    VueComposition,
    /// Svelte 5 runes mode
    SvelteRunes,
    /// Dialect not in the registry; generic default semantics apply
    #[default]
    Unknown,
}

impl Framework {
    /// Human-readable dialect name.
    #[inline]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::React => "React",
            Self::VueComposition => "Vue Composition",
            Self::SvelteRunes => "Svelte Runes",
            Self::Unknown => "Unknown",
        }
    }
}

// Role vocabulary is shared with the output model; re-exported here so the
// extractor contract stays a single-crate import.
pub use riviere_socle::BindingRole;

/// One declared prop of the component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropDescriptor {
    /// Prop name as bound in the component scope.
    pub name: String,
    /// Extractor's initial data/function guess (callback props vs values).
    pub role_guess: BindingRole,
}

impl PropDescriptor {
    pub fn new(name: impl Into<String>, role_guess: BindingRole) -> Self {
        Self {
            name: name.into(),
            role_guess,
        }
    }

    /// A plain value prop.
    pub fn data(name: impl Into<String>) -> Self {
        Self::new(name, BindingRole::Data)
    }

    /// A callback prop.
    pub fn function(name: impl Into<String>) -> Self {
        Self::new(name, BindingRole::Function)
    }
}

/// Structural facts extracted from one component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentAnalysis {
    /// Component name (file stem or exported identifier).
    pub name: String,
    /// Path of the source file the facts came from.
    pub file_path: String,
    /// Source dialect.
    pub framework: Framework,
    /// Declared props, in declaration order.
    pub props: Vec<PropDescriptor>,
    /// Hook/composable invocations, in source order.
    pub hooks: Vec<HookInvocation>,
    /// Root of the rendered-output tree.
    pub render_root: RenderNode,
}

impl ComponentAnalysis {
    pub fn new(
        name: impl Into<String>,
        file_path: impl Into<String>,
        framework: Framework,
    ) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            framework,
            props: Vec::new(),
            hooks: Vec::new(),
            render_root: RenderNode::empty_root(),
        }
    }

    pub fn with_props(mut self, props: Vec<PropDescriptor>) -> Self {
        self.props = props;
        self
    }

    pub fn with_hooks(mut self, hooks: Vec<HookInvocation>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_render_root(mut self, root: RenderNode) -> Self {
        self.render_root = root;
        self
    }

    /// Look up a prop by name.
    #[inline]
    pub fn prop(&self, name: &str) -> Option<&PropDescriptor> {
        self.props.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_display_name() {
        assert_eq!(Framework::React.display_name(), "React");
        assert_eq!(Framework::SvelteRunes.display_name(), "Svelte Runes");
    }

    #[test]
    fn test_prop_lookup() {
        let analysis = ComponentAnalysis::new("Counter", "Counter.tsx", Framework::React)
            .with_props(vec![
                PropDescriptor::data("title"),
                PropDescriptor::function("onClose"),
            ]);

        assert_eq!(
            analysis.prop("onClose").map(|p| p.role_guess),
            Some(BindingRole::Function)
        );
        assert!(analysis.prop("missing").is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let analysis = ComponentAnalysis::new("Counter", "Counter.tsx", Framework::React);
        let json = serde_json::to_string(&analysis).unwrap();
        let back: ComponentAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name.as_str(), "Counter");
        assert_eq!(back.framework, Framework::React);
    }
}
