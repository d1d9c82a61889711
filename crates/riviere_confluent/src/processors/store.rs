//! Store libraries (Pinia, Zustand).
//!
//! Stores are addressed through generated hooks named `use<Name>Store`; the
//! store name is the resource key, so every access to the same store within
//! one analysis shares one node. Returned handles take their roles from the
//! classifier's verdicts (these hooks are custom-shaped, not builtin).

use crate::classifier::ClassifiedHook;
use crate::processor::{Priority, Processor, ProcessorError, ProcessorMeta, ProcessorOutput};
use crate::session::{AnalysisSession, ResourceKey};
use regex::Regex;
use riviere_delta::{BindingRecord, DfdNode, NodeKind};
use riviere_socle::BindingRole;

static META: ProcessorMeta = ProcessorMeta {
    id: "shared-store",
    library: "pinia",
    package_patterns: &["pinia", "zustand"],
    // matches by hook-name pattern, not by literal list
    hook_names: &[],
    priority: Priority::ThirdParty,
};

/// Shared-store access hooks, matched by the `use*Store` naming scheme.
pub struct StoreProcessor {
    pattern: Regex,
}

impl StoreProcessor {
    pub fn new() -> Self {
        Self {
            // compiled once per processor set; the pattern itself is config,
            // not analysis state
            pattern: Regex::new(r"^use[A-Z][A-Za-z0-9]*Store$").expect("valid store pattern"),
        }
    }
}

impl Default for StoreProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for StoreProcessor {
    fn meta(&self) -> &'static ProcessorMeta {
        &META
    }

    fn matches_hook(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    fn process(
        &self,
        hook: &ClassifiedHook,
        session: &mut AnalysisSession,
    ) -> Result<ProcessorOutput, ProcessorError> {
        let invocation = &hook.invocation;
        let mut output = ProcessorOutput::handled();

        // useCartStore -> "CartStore"
        let store_name = invocation
            .callee
            .strip_prefix("use")
            .unwrap_or(invocation.callee.as_str());
        let resource = ResourceKey::Store(store_name.into());

        let (id, created) = match session.resource_node(&resource) {
            Some(id) => (id.clone(), false),
            None => {
                let id = session.next_id(NodeKind::DataStore);
                output.add_node(
                    DfdNode::new(id.clone(), store_name, NodeKind::DataStore)
                        .with_pos(invocation.site)
                        .with_meta("hook", invocation.callee.clone())
                        .with_meta("store", store_name),
                );
                session.bind_resource(resource, id.clone());
                (id, true)
            }
        };

        for binding in &invocation.bindings {
            let role = hook.role_of(binding).unwrap_or(BindingRole::Data);
            let record = if role.is_function() {
                session.register_mutator(binding.clone(), id.clone());
                BindingRecord::write(binding.clone())
            } else {
                BindingRecord::read(binding.clone())
            };
            session.register_owner(binding.clone(), id.clone());
            if created {
                if let Some(node) = output.nodes.iter_mut().find(|n| n.id == id) {
                    node.meta.record_binding(record);
                }
            } else {
                output.augment(&id, record);
            }
        }

        Ok(output)
    }
}
