//! Hook classification.
//!
//! Assigns each invocation a category (builtin with a pre-known shape, or
//! custom) and resolves a role per bound variable. Role resolution is an
//! ordered fallback chain:
//!
//! 1. builtin shape — pair builtins bind `[data, function]`, read-only
//!    builtins bind `data`, neither tier is consulted;
//! 2. type oracle — function-shaped type means `function`;
//! 3. naming heuristic — always computed, and it wins one documented
//!    conflict: a function-like name whose oracle type is a non-function
//!    primitive stays `function` (setters surface as `number` more often
//!    than type display strings admit).
//!
//! An unreachable, slow or confused oracle never fails classification; the
//! chain just falls through to the heuristic.

use crate::builtins::{builtin_kind, BuiltinKind};
use crate::heuristic::role_from_name;
use riviere_amont::HookInvocation;
use riviere_socle::{BindingRole, CompactString, FxHashMap, SourcePos};
use riviere_sonde::{split_object_members, TypeKind, TypeOracle};

/// Category assigned to an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCategory {
    /// A builtin primitive with a pre-known shape.
    Builtin(BuiltinKind),
    /// Anything else; the fallback processor owns it.
    Custom,
}

impl HookCategory {
    #[inline]
    pub const fn is_builtin(self) -> bool {
        matches!(self, Self::Builtin(_))
    }
}

/// An invocation after classification: category, per-variable roles, and
/// (for reducer-style builtins) the scanned state member names. Built once,
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct ClassifiedHook {
    pub invocation: HookInvocation,
    pub category: HookCategory,
    roles: FxHashMap<CompactString, BindingRole>,
    pub state_members: Vec<CompactString>,
}

impl ClassifiedHook {
    /// Role of a bound variable, if it belongs to this invocation.
    #[inline]
    pub fn role_of(&self, name: &str) -> Option<BindingRole> {
        self.roles.get(name).copied()
    }

    /// Bound names with their roles, in binding order.
    pub fn roles(&self) -> impl Iterator<Item = (&str, BindingRole)> {
        self.invocation
            .bindings
            .iter()
            .filter_map(|name| self.roles.get(name).map(|role| (name.as_str(), *role)))
    }
}

/// Classifies invocations against the builtin tables, the oracle and the
/// naming heuristic.
pub struct HookClassifier<'a> {
    oracle: Option<&'a dyn TypeOracle>,
    file_path: &'a str,
}

impl<'a> HookClassifier<'a> {
    pub fn new(file_path: &'a str, oracle: Option<&'a dyn TypeOracle>) -> Self {
        Self { oracle, file_path }
    }

    /// Classify one invocation. Oracle queries are awaited sequentially per
    /// binding so node-id ordering downstream stays deterministic.
    pub async fn classify(&self, invocation: &HookInvocation) -> ClassifiedHook {
        let mut roles = FxHashMap::default();
        let mut state_members = Vec::new();

        let category = match builtin_kind(&invocation.callee) {
            Some(kind) => {
                self.assign_builtin_roles(kind, invocation, &mut roles);
                if kind.is_reducer_style() {
                    state_members = self.scan_state_members(invocation).await;
                }
                HookCategory::Builtin(kind)
            }
            None => {
                for name in &invocation.bindings {
                    let role = self.resolve_role(invocation.site, name).await;
                    roles.insert(name.clone(), role);
                }
                HookCategory::Custom
            }
        };

        ClassifiedHook {
            invocation: invocation.clone(),
            category,
            roles,
            state_members,
        }
    }

    /// Builtin shapes skip both tiers: the table already knows the roles.
    fn assign_builtin_roles(
        &self,
        kind: BuiltinKind,
        invocation: &HookInvocation,
        roles: &mut FxHashMap<CompactString, BindingRole>,
    ) {
        match kind {
            BuiltinKind::StatePair | BuiltinKind::Reducer => {
                for (i, name) in invocation.bindings.iter().enumerate() {
                    let role = if i == 0 {
                        BindingRole::Data
                    } else {
                        BindingRole::Function
                    };
                    roles.insert(name.clone(), role);
                }
            }
            BuiltinKind::Callback => {
                for name in &invocation.bindings {
                    roles.insert(name.clone(), BindingRole::Function);
                }
            }
            BuiltinKind::Effect => {
                // the only thing an effect binds is its stop/cleanup handle
                for name in &invocation.bindings {
                    roles.insert(name.clone(), BindingRole::Function);
                }
            }
            BuiltinKind::Ref
            | BuiltinKind::Reactive
            | BuiltinKind::Derived
            | BuiltinKind::Context
            | BuiltinKind::ReadonlyValue => {
                for name in &invocation.bindings {
                    roles.insert(name.clone(), BindingRole::Data);
                }
            }
        }
    }

    /// Two-tier resolution for one custom binding.
    async fn resolve_role(&self, pos: SourcePos, name: &str) -> BindingRole {
        let heuristic = role_from_name(name);
        let Some(oracle) = self.oracle else {
            return heuristic;
        };

        match oracle.resolve_type(self.file_path, pos, name).await {
            Ok(facts) => {
                if facts.is_function() {
                    return BindingRole::Function;
                }
                if facts.kind == TypeKind::Unknown {
                    return heuristic;
                }
                // Documented override: function-like name + non-function
                // primitive type keeps the heuristic verdict.
                if heuristic.is_function() && facts.is_non_function_primitive() {
                    return BindingRole::Function;
                }
                BindingRole::Data
            }
            Err(err) => {
                tracing::debug!(
                    file = self.file_path,
                    binding = name,
                    error = %err,
                    "type oracle unavailable, using naming heuristic"
                );
                heuristic
            }
        }
    }

    /// Ask the oracle for the reducer state's shape and scan out its member
    /// names. Best-effort: no oracle or no object shape means no members.
    async fn scan_state_members(&self, invocation: &HookInvocation) -> Vec<CompactString> {
        let (Some(oracle), Some(state_name)) = (self.oracle, invocation.bindings.first()) else {
            return Vec::new();
        };
        match oracle
            .resolve_type(self.file_path, invocation.site, state_name)
            .await
        {
            Ok(facts) => split_object_members(&facts.display)
                .into_iter()
                .map(|member| member.name)
                .collect(),
            Err(err) => {
                tracing::debug!(
                    file = self.file_path,
                    binding = %state_name,
                    error = %err,
                    "state shape unavailable"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riviere_amont::BindingForm;
    use riviere_sonde::{TableOracle, TypeFacts};

    fn custom_hook(bindings: &[&str]) -> HookInvocation {
        HookInvocation::new("useCounter", SourcePos::new(2, 3)).with_bindings(
            BindingForm::ObjectPattern,
            bindings.iter().map(|&b| b.into()).collect(),
        )
    }

    #[tokio::test]
    async fn test_custom_hook_heuristic_only() {
        let classifier = HookClassifier::new("Counter.tsx", None);
        let classified = classifier
            .classify(&custom_hook(&["count", "increment", "decrement", "reset"]))
            .await;

        assert_eq!(classified.category, HookCategory::Custom);
        assert_eq!(classified.role_of("count"), Some(BindingRole::Data));
        assert_eq!(classified.role_of("increment"), Some(BindingRole::Function));
        assert_eq!(classified.role_of("decrement"), Some(BindingRole::Function));
        assert_eq!(classified.role_of("reset"), Some(BindingRole::Function));
    }

    #[tokio::test]
    async fn test_oracle_function_shape_wins_over_data_name() {
        let oracle = TableOracle::new().with_entry("refresh", TypeFacts::function("() => void"));
        let classifier = HookClassifier::new("a.tsx", Some(&oracle));
        // "refresh" is not in the pattern set; only the oracle knows
        let classified = classifier.classify(&custom_hook(&["refresh"])).await;
        assert_eq!(classified.role_of("refresh"), Some(BindingRole::Function));
    }

    #[tokio::test]
    async fn test_heuristic_overrides_primitive_oracle() {
        // oracle says boolean, name says function: heuristic wins
        let oracle = TableOracle::new().with_entry("isVisible", TypeFacts::primitive("boolean"));
        let classifier = HookClassifier::new("a.tsx", Some(&oracle));
        let classified = classifier.classify(&custom_hook(&["isVisible"])).await;
        assert_eq!(classified.role_of("isVisible"), Some(BindingRole::Function));
    }

    #[tokio::test]
    async fn test_oracle_object_beats_function_name() {
        // non-primitive oracle answer wins over the name pattern
        let oracle = TableOracle::new().with_entry("onConfig", TypeFacts::object("{ a: 1 }"));
        let classifier = HookClassifier::new("a.tsx", Some(&oracle));
        let classified = classifier.classify(&custom_hook(&["onConfig"])).await;
        assert_eq!(classified.role_of("onConfig"), Some(BindingRole::Data));
    }

    #[tokio::test]
    async fn test_oracle_miss_falls_back_to_heuristic() {
        let oracle = TableOracle::new();
        let classifier = HookClassifier::new("a.tsx", Some(&oracle));
        let classified = classifier.classify(&custom_hook(&["setTitle", "title"])).await;
        assert_eq!(classified.role_of("setTitle"), Some(BindingRole::Function));
        assert_eq!(classified.role_of("title"), Some(BindingRole::Data));
    }

    #[tokio::test]
    async fn test_builtin_pair_shape() {
        let classifier = HookClassifier::new("Counter.tsx", None);
        let invocation = HookInvocation::new("useState", SourcePos::new(1, 1)).with_bindings(
            BindingForm::ArrayPattern,
            vec!["count".into(), "setCount".into()],
        );
        let classified = classifier.classify(&invocation).await;

        assert_eq!(
            classified.category,
            HookCategory::Builtin(BuiltinKind::StatePair)
        );
        assert_eq!(classified.role_of("count"), Some(BindingRole::Data));
        assert_eq!(classified.role_of("setCount"), Some(BindingRole::Function));
    }

    #[tokio::test]
    async fn test_read_only_builtin_skips_both_tiers() {
        // A function-like name bound from a read-only builtin stays data;
        // an oracle claiming otherwise is never consulted.
        let oracle = TableOracle::new().with_entry("toggle", TypeFacts::function("() => void"));
        let classifier = HookClassifier::new("a.vue", Some(&oracle));
        let invocation = HookInvocation::new("ref", SourcePos::new(1, 1)).with_single_binding("toggle");
        let classified = classifier.classify(&invocation).await;
        assert_eq!(classified.role_of("toggle"), Some(BindingRole::Data));
    }

    #[tokio::test]
    async fn test_reducer_state_member_scan() {
        let oracle = TableOracle::new()
            .with_entry("state", TypeFacts::object("{ count: number; step: number }"));
        let classifier = HookClassifier::new("a.tsx", Some(&oracle));
        let invocation = HookInvocation::new("useReducer", SourcePos::new(1, 1)).with_bindings(
            BindingForm::ArrayPattern,
            vec!["state".into(), "dispatch".into()],
        );
        let classified = classifier.classify(&invocation).await;

        assert_eq!(classified.state_members, vec!["count", "step"]);
        assert_eq!(classified.role_of("dispatch"), Some(BindingRole::Function));
    }
}
