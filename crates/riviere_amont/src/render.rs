//! Rendered-output tree.
//!
//! A dialect-neutral view of what the component renders: elements with
//! attribute bindings, text interpolations, conditional blocks and iteration
//! blocks. Expression nodes never carry an AST — only the source text and the
//! component-scope identifiers the extractor resolved inside it. That is all
//! the assembler needs to draw edges.

use riviere_socle::{SourcePos, String};
use serde::{Deserialize, Serialize};

/// An expression with its resolved component-scope references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExprRef {
    /// Raw expression text as it appeared in the source.
    pub source: String,
    /// Component-scope identifiers referenced by the expression, in
    /// appearance order. `() => setCount(count + 1)` yields
    /// `["setCount", "count"]`, the same surface a direct reference gives.
    pub refs: Vec<String>,
}

impl ExprRef {
    pub fn new(source: impl Into<String>, refs: Vec<String>) -> Self {
        Self {
            source: source.into(),
            refs,
        }
    }

    /// An expression that is exactly one identifier.
    pub fn ident(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            source: name.clone(),
            refs: vec![name],
        }
    }
}

/// Value side of an attribute binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AttrValue {
    /// Static string value; never produces edges.
    Static(String),
    /// Dynamic expression value.
    Expr(ExprRef),
}

/// One attribute on an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrBinding {
    /// Attribute name as written (`onClick`, `value`, `on:click`, `@input`).
    pub name: String,
    pub value: AttrValue,
}

impl AttrBinding {
    pub fn new(name: impl Into<String>, value: AttrValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn expr(name: impl Into<String>, expr: ExprRef) -> Self {
        Self::new(name, AttrValue::Expr(expr))
    }

    pub fn statik(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, AttrValue::Static(value.into()))
    }

    /// Whether this attribute is event-style in any supported dialect:
    /// React `onClick`, Vue `@click`/`v-on:click`, Svelte `on:click`.
    pub fn is_event(&self) -> bool {
        let name = self.name.as_str();
        if let Some(rest) = name.strip_prefix("on") {
            if rest.starts_with(|c: char| c.is_ascii_uppercase()) || rest.starts_with(':') {
                return true;
            }
        }
        name.starts_with('@') || name.starts_with("v-on:")
    }

    /// Event name with dialect prefixes stripped (`onClick` -> `Click`,
    /// `on:click` -> `click`, `@input` -> `input`). The assembler labels
    /// invocation edges with the attribute as written, so this is only used
    /// for metadata.
    pub fn event_name(&self) -> Option<&str> {
        let name = self.name.as_str();
        if let Some(rest) = name.strip_prefix("v-on:") {
            return Some(rest);
        }
        if let Some(rest) = name.strip_prefix("on:") {
            return Some(rest);
        }
        if let Some(rest) = name.strip_prefix('@') {
            return Some(rest);
        }
        if let Some(rest) = name.strip_prefix("on") {
            if rest.starts_with(|c: char| c.is_ascii_uppercase()) {
                return Some(rest);
            }
        }
        None
    }
}

/// An element in the rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementNode {
    /// Tag or component name (`p`, `button`, `UserCard`).
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<SourcePos>,
    #[serde(default)]
    pub attrs: Vec<AttrBinding>,
    #[serde(default)]
    pub children: Vec<RenderNode>,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            pos: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_pos(mut self, pos: SourcePos) -> Self {
        self.pos = Some(pos);
        self
    }

    pub fn with_attr(mut self, attr: AttrBinding) -> Self {
        self.attrs.push(attr);
        self
    }

    pub fn with_child(mut self, child: RenderNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A conditional block (`cond ? a : b`, `v-if`, `{#if}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalNode {
    /// Controlling expression.
    pub test: ExprRef,
    #[serde(default)]
    pub then_children: Vec<RenderNode>,
    #[serde(default)]
    pub else_children: Vec<RenderNode>,
}

impl ConditionalNode {
    pub fn new(test: ExprRef) -> Self {
        Self {
            test,
            then_children: Vec::new(),
            else_children: Vec::new(),
        }
    }

    pub fn with_then(mut self, children: Vec<RenderNode>) -> Self {
        self.then_children = children;
        self
    }

    pub fn with_else(mut self, children: Vec<RenderNode>) -> Self {
        self.else_children = children;
        self
    }
}

/// An iteration block (`items.map(...)`, `v-for`, `{#each}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationNode {
    /// Iterated collection expression.
    pub collection: ExprRef,
    /// Loop-local bindings (`item`, `index`); shadow component scope inside.
    #[serde(default)]
    pub item_bindings: Vec<String>,
    #[serde(default)]
    pub children: Vec<RenderNode>,
}

impl IterationNode {
    pub fn new(collection: ExprRef) -> Self {
        Self {
            collection,
            item_bindings: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_item_bindings(mut self, bindings: Vec<String>) -> Self {
        self.item_bindings = bindings;
        self
    }

    pub fn with_children(mut self, children: Vec<RenderNode>) -> Self {
        self.children = children;
        self
    }
}

/// One node of the rendered-output tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "kebab-case")]
pub enum RenderNode {
    Element(ElementNode),
    /// Static text; never produces edges.
    Text { content: String },
    /// `{expr}` / `{{ expr }}` interpolation.
    Interpolation { expr: ExprRef },
    Conditional(ConditionalNode),
    Iteration(IterationNode),
}

impl RenderNode {
    /// Empty root for components whose output the extractor elided.
    pub fn empty_root() -> Self {
        Self::Element(ElementNode::new("fragment"))
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn interpolation(expr: ExprRef) -> Self {
        Self::Interpolation { expr }
    }
}
