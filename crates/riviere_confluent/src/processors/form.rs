//! Form-state libraries (React Hook Form, VeeValidate).
//!
//! Everything a form hook returns consolidates into one node, tagged data or
//! process by the static map below; unmapped properties default to `data`.

use crate::classifier::ClassifiedHook;
use crate::processor::{Priority, Processor, ProcessorError, ProcessorMeta, ProcessorOutput};
use crate::session::AnalysisSession;
use phf::phf_map;
use riviere_delta::{BindingRecord, DfdNode, NodeKind};
use riviere_socle::BindingRole;

static META: ProcessorMeta = ProcessorMeta {
    id: "form-state",
    library: "react-hook-form",
    package_patterns: &["react-hook-form", "vee-validate"],
    hook_names: &["useForm", "useFormContext", "useWatch"],
    priority: Priority::ThirdParty,
};

/// Returned-handle role map; unmapped properties default to `data`.
static PROPERTY_ROLES: phf::Map<&'static str, BindingRole> = phf_map! {
    // data handles
    "formState" => BindingRole::Data,
    "errors" => BindingRole::Data,
    "values" => BindingRole::Data,
    "control" => BindingRole::Data,
    "meta" => BindingRole::Data,
    "isSubmitting" => BindingRole::Data,
    // process handles
    "register" => BindingRole::Function,
    "handleSubmit" => BindingRole::Function,
    "watch" => BindingRole::Function,
    "setValue" => BindingRole::Function,
    "getValues" => BindingRole::Function,
    "setError" => BindingRole::Function,
    "clearErrors" => BindingRole::Function,
    "reset" => BindingRole::Function,
    "trigger" => BindingRole::Function,
    "resetForm" => BindingRole::Function,
    "setFieldValue" => BindingRole::Function,
    "defineField" => BindingRole::Function,
    "validate" => BindingRole::Function,
};

/// Form-state hooks.
pub struct FormProcessor;

impl Processor for FormProcessor {
    fn meta(&self) -> &'static ProcessorMeta {
        &META
    }

    fn process(
        &self,
        hook: &ClassifiedHook,
        session: &mut AnalysisSession,
    ) -> Result<ProcessorOutput, ProcessorError> {
        let invocation = &hook.invocation;
        let mut output = ProcessorOutput::handled();

        let id = session.next_id(NodeKind::DataStore);
        let mut node = DfdNode::new(id.clone(), "form", NodeKind::DataStore)
            .with_pos(invocation.site)
            .with_meta("hook", invocation.callee.clone());

        for binding in &invocation.bindings {
            let role = PROPERTY_ROLES
                .get(binding.as_str())
                .copied()
                .unwrap_or(BindingRole::Data);
            let record = if role.is_function() {
                session.register_mutator(binding.clone(), id.clone());
                BindingRecord::write(binding.clone())
            } else {
                BindingRecord::read(binding.clone())
            };
            session.register_owner(binding.clone(), id.clone());
            node.meta.record_binding(record);
        }

        output.add_node(node);
        Ok(output)
    }
}
