//! Hook/composable invocation facts.
//!
//! One `HookInvocation` per call site, in source order. The extractor
//! resolves binding names (array and object destructuring included) and
//! records what it could tell about each argument without evaluating it.

use riviere_socle::{SourcePos, String};
use serde::{Deserialize, Serialize};

/// What the extractor could tell about one hook argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum HookArg {
    /// A literal key: string/number literal, or an array of literals
    /// flattened to its joined form (query keys).
    Literal(String),
    /// A plain identifier reference (atom names, store references).
    Ident(String),
    /// Anything the extractor could not reduce to a name.
    Opaque,
}

impl HookArg {
    /// The statically-known name carried by this argument, if any.
    #[inline]
    pub fn static_name(&self) -> Option<&str> {
        match self {
            Self::Literal(s) | Self::Ident(s) => Some(s.as_str()),
            Self::Opaque => None,
        }
    }
}

/// Shape of the binding pattern on the left-hand side of the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BindingForm {
    /// `const x = useThing()`
    #[default]
    Single,
    /// `const [a, b] = useThing()`
    ArrayPattern,
    /// `const { a, b } = useThing()`
    ObjectPattern,
    /// Bare call, nothing bound: `useEffect(() => ...)`
    None,
}

/// One hook/composable call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookInvocation {
    /// Call site position.
    pub site: SourcePos,
    /// Invoked name (`useState`, `useQuery`, `computed`, ...).
    pub callee: String,
    /// Originating package when imports resolve it (`@tanstack/react-query`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Binding pattern shape.
    #[serde(default)]
    pub form: BindingForm,
    /// Bound variable names in pattern order.
    #[serde(default)]
    pub bindings: Vec<String>,
    /// Argument facts in call order.
    #[serde(default)]
    pub args: Vec<HookArg>,
    /// Declared dependency list (`useEffect(..., [a, b])`, `watch([a], ...)`).
    #[serde(default)]
    pub deps: Vec<String>,
}

impl HookInvocation {
    pub fn new(callee: impl Into<String>, site: SourcePos) -> Self {
        Self {
            site,
            callee: callee.into(),
            package: None,
            form: BindingForm::None,
            bindings: Vec::new(),
            args: Vec::new(),
            deps: Vec::new(),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_bindings(mut self, form: BindingForm, bindings: Vec<String>) -> Self {
        self.form = form;
        self.bindings = bindings;
        self
    }

    /// Single-identifier binding: `const x = useThing()`.
    pub fn with_single_binding(self, name: impl Into<String>) -> Self {
        self.with_bindings(BindingForm::Single, vec![name.into()])
    }

    pub fn with_args(mut self, args: Vec<HookArg>) -> Self {
        self.args = args;
        self
    }

    pub fn with_deps(mut self, deps: Vec<String>) -> Self {
        self.deps = deps;
        self
    }

    /// First argument's statically-known name, if any. This is the resource
    /// key position for atom/query/store invocations.
    #[inline]
    pub fn first_arg_name(&self) -> Option<&str> {
        self.args.first().and_then(HookArg::static_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_arg_name() {
        let inv = HookInvocation::new("useAtom", SourcePos::new(3, 1))
            .with_args(vec![HookArg::Ident("countAtom".into())]);
        assert_eq!(inv.first_arg_name(), Some("countAtom"));

        let opaque = HookInvocation::new("useAtom", SourcePos::new(4, 1))
            .with_args(vec![HookArg::Opaque]);
        assert_eq!(opaque.first_arg_name(), None);
    }

    #[test]
    fn test_binding_builders() {
        let inv = HookInvocation::new("useState", SourcePos::new(1, 1)).with_bindings(
            BindingForm::ArrayPattern,
            vec!["count".into(), "setCount".into()],
        );
        assert_eq!(inv.form, BindingForm::ArrayPattern);
        assert_eq!(inv.bindings.len(), 2);
    }
}
