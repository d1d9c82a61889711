//! Naming-heuristic role verdicts.
//!
//! The second tier of the classifier: a fixed pattern set over binding names.
//! Verbs and verb prefixes read as `function`; everything else reads as
//! `data`. The heuristic never consults types — it runs even when the oracle
//! is reachable, because it can override an oracle answer (a function-like
//! name typed as a bare primitive keeps its function verdict).

use phf::phf_set;
use riviere_socle::BindingRole;

/// Exact names that always read as functions.
static FUNCTION_NAMES: phf::Set<&'static str> = phf_set! {
    "increment",
    "decrement",
    "dispatch",
    "navigate",
    "logout",
    "login",
    "submit",
    "reset",
    "clear",
};

/// Prefixes that read as functions when they sit on a word boundary.
static FUNCTION_PREFIXES: &[&str] = &[
    "on", "handle", "set", "get", "update", "delete", "create", "fetch", "load", "toggle", "is",
    "has", "can", "should",
];

/// Whether `name` starts with `prefix` on a camelCase/snake_case boundary.
/// The boundary check keeps `items` from reading as `is*` and `settings`
/// from reading as `set*`.
fn has_prefix_on_boundary(name: &str, prefix: &str) -> bool {
    let Some(rest) = name.strip_prefix(prefix) else {
        return false;
    };
    match rest.chars().next() {
        None => true,
        Some(c) => c.is_ascii_uppercase() || c == '_',
    }
}

/// Naming-heuristic verdict for one binding name.
pub fn role_from_name(name: &str) -> BindingRole {
    if FUNCTION_NAMES.contains(name) {
        return BindingRole::Function;
    }
    if FUNCTION_PREFIXES
        .iter()
        .any(|prefix| has_prefix_on_boundary(name, prefix))
    {
        return BindingRole::Function;
    }
    BindingRole::Data
}
