//! Builtin hook/composable identifiers for classification.
//!
//! Provides lookup for the builtin primitives of each supported dialect:
//! - React hooks (useState, useReducer, useEffect, ...)
//! - Vue Composition API (ref, reactive, computed, watch, ...)
//! - Svelte runes ($state, $derived, $effect, ...)
//!
//! Uses compile-time perfect hash maps (phf) for O(1) lookup with zero
//! runtime initialization cost. Anything not in these tables is a
//! custom-hook candidate and goes through the two-tier role classifier.

use phf::phf_map;

/// Shape category of a builtin primitive, pre-known per name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BuiltinKind {
    /// `[value, setter]` pair: useState, useTransition
    StatePair = 0,
    /// `[state, dispatch]` pair whose state shape is worth a member scan
    Reducer = 1,
    /// Single mutable cell: useRef, ref, shallowRef, $state
    Ref = 2,
    /// Proxy-style reactive object: reactive, shallowReactive
    Reactive = 3,
    /// Derived value: useMemo, computed, $derived
    Derived = 4,
    /// Memoized callable: useCallback
    Callback = 5,
    /// Side-effect registration: useEffect, watch, watchEffect, $effect
    Effect = 6,
    /// Externally provided value: useContext, inject
    Context = 7,
    /// Read-only builtin value: useId, useDeferredValue, toRef, readonly
    ReadonlyValue = 8,
}

impl BuiltinKind {
    /// Read-only builtins bind a single identifier that defaults to `data`
    /// without consulting the oracle or the naming heuristic.
    #[inline]
    pub const fn is_read_only(self) -> bool {
        matches!(
            self,
            Self::Ref | Self::Reactive | Self::Derived | Self::Context | Self::ReadonlyValue
        )
    }

    /// Reducer-style builtins get their state shape scanned for members.
    #[inline]
    pub const fn is_reducer_style(self) -> bool {
        matches!(self, Self::Reducer)
    }

    /// Pair builtins bind `[value, mutator]` in order.
    #[inline]
    pub const fn is_pair(self) -> bool {
        matches!(self, Self::StatePair | Self::Reducer)
    }
}

/// Builtin name table across all supported dialects. Names do not collide
/// between dialects, so one table serves the classifier for all of them.
static BUILTIN_KINDS: phf::Map<&'static str, BuiltinKind> = phf_map! {
    // React
    "useState" => BuiltinKind::StatePair,
    "useReducer" => BuiltinKind::Reducer,
    "useTransition" => BuiltinKind::StatePair,
    "useRef" => BuiltinKind::Ref,
    "useMemo" => BuiltinKind::Derived,
    "useCallback" => BuiltinKind::Callback,
    "useEffect" => BuiltinKind::Effect,
    "useLayoutEffect" => BuiltinKind::Effect,
    "useInsertionEffect" => BuiltinKind::Effect,
    "useContext" => BuiltinKind::Context,
    "useId" => BuiltinKind::ReadonlyValue,
    "useDeferredValue" => BuiltinKind::ReadonlyValue,
    "useSyncExternalStore" => BuiltinKind::ReadonlyValue,
    // Vue Composition API
    "ref" => BuiltinKind::Ref,
    "shallowRef" => BuiltinKind::Ref,
    "reactive" => BuiltinKind::Reactive,
    "shallowReactive" => BuiltinKind::Reactive,
    "computed" => BuiltinKind::Derived,
    "watch" => BuiltinKind::Effect,
    "watchEffect" => BuiltinKind::Effect,
    "watchPostEffect" => BuiltinKind::Effect,
    "watchSyncEffect" => BuiltinKind::Effect,
    "provide" => BuiltinKind::Effect,
    "inject" => BuiltinKind::Context,
    "toRef" => BuiltinKind::ReadonlyValue,
    "toRefs" => BuiltinKind::ReadonlyValue,
    "readonly" => BuiltinKind::ReadonlyValue,
    // Svelte runes
    "$state" => BuiltinKind::Ref,
    "$state.raw" => BuiltinKind::Ref,
    "$derived" => BuiltinKind::Derived,
    "$derived.by" => BuiltinKind::Derived,
    "$effect" => BuiltinKind::Effect,
    "$effect.pre" => BuiltinKind::Effect,
    "$bindable" => BuiltinKind::Ref,
    "$props" => BuiltinKind::ReadonlyValue,
};

/// Look up the builtin kind for an invoked name.
#[inline]
pub fn builtin_kind(name: &str) -> Option<BuiltinKind> {
    BUILTIN_KINDS.get(name).copied()
}

/// Check if a name is a builtin primitive of any supported dialect.
#[inline]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_KINDS.contains_key(name)
}
