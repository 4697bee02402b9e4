//! Form Generator Component
//!
//! Owns the model signal and dispatches every edit to the element tree.

use cylc_forms::model::{Edit, PropertyPath, ValidationReport};
use cylc_forms::registry::Widget;
use cylc_forms::resolver::{ElementKind, FormElement};
use leptos::prelude::*;
use serde_json::Value;

use super::fields::{EnumSelect, NumberInput, SwitchInput, TextInput};
use super::group_field::GroupField;
use super::list_field::ListField;

// ============================================================================
// Main Component
// ============================================================================

/// Form for a resolved element tree
#[component]
pub fn GraphqlForm(
    /// Root element, usually a mutation's argument group
    element: FormElement,
    /// Current model; replaced on every accepted edit
    model: RwSignal<Value>,
    /// Called with the new root value after every accepted edit
    #[prop(optional)]
    on_input: Option<Callback<Value>>,
) -> impl IntoView {
    let (last_error, set_last_error) = signal(Option::<String>::None);

    let element_for_report = element.clone();
    let report = Memo::new(move |_| element_for_report.validate(&model.get()));

    let root = element.clone();
    let dispatch = Callback::new(move |edit: Edit| {
        let current = model.get_untracked();
        match root.apply(&current, &edit, &PropertyPath::root()) {
            Ok(next) => {
                set_last_error.set(None);
                model.set(next.clone());
                if let Some(on_input) = on_input {
                    on_input.run(next);
                }
            }
            Err(e) => {
                log::warn!("Rejected edit: {}", e);
                set_last_error.set(Some(e.to_string()));
            }
        }
    });

    view! {
        <div class="graphql-form space-y-2">
            <FormField
                element=element
                value=Signal::derive(move || model.get())
                path=PropertyPath::root()
                report=report
                on_edit=dispatch
                depth=0
            />
            {move || last_error.get().map(|err| view! {
                <div class="p-2 text-xs text-red-700 bg-red-50 rounded">{err}</div>
            })}
        </div>
    }
}

// ============================================================================
// Field Dispatch
// ============================================================================

/// Renders one element: header, the widget for its kind, and rule messages
#[component]
pub fn FormField(
    element: FormElement,
    value: Signal<Value>,
    path: PropertyPath,
    report: Memo<ValidationReport>,
    on_edit: Callback<Edit>,
    depth: usize,
) -> impl IntoView {
    let label = element.label().to_string();
    let is_required = element.is_required();
    let graphql_type = element.graphql_type.clone();
    let description = element.description.clone();

    let indent_class = if depth == 0 {
        ""
    } else {
        "ml-4 border-l-2 border-gray-200 pl-3"
    };

    let path_str = path.to_string();
    let messages = move || report.get().messages_for(&path_str).to_vec();

    view! {
        <div class=format!("rounded-lg p-2 {}", indent_class)>
            {(depth > 0).then(|| view! {
                <div class="flex items-center justify-between mb-1">
                    <div class="flex items-center gap-2">
                        <span class="text-sm font-medium text-gray-700">{label.clone()}</span>
                        <span class="text-xs text-gray-400">{graphql_type.clone()}</span>
                        {is_required.then(|| view! {
                            <span class="text-xs text-red-500 font-medium">"*"</span>
                        })}
                    </div>
                    {description.clone().map(|desc| view! {
                        <span class="text-xs text-gray-500 truncate max-w-xs" title=desc.clone()>{desc.clone()}</span>
                    })}
                </div>
            })}

            {move || {
                let element = element.clone();
                let path = path.clone();
                match &element.kind {
                    ElementKind::Scalar { .. } => match element.widget() {
                        Widget::Number => view! {
                            <NumberInput props=element.descriptor.props.clone() value=value on_edit=on_edit />
                        }.into_any(),
                        Widget::Switch => view! {
                            <SwitchInput props=element.descriptor.props.clone() value=value on_edit=on_edit />
                        }.into_any(),
                        _ => view! {
                            <TextInput props=element.descriptor.props.clone() value=value on_edit=on_edit />
                        }.into_any(),
                    },
                    ElementKind::Enum { values, .. } => view! {
                        <EnumSelect
                            props=element.descriptor.props.clone()
                            values=values.clone()
                            value=value
                            on_edit=on_edit
                        />
                    }.into_any(),
                    ElementKind::List { item } => view! {
                        <ListField
                            item=(**item).clone()
                            value=value
                            path=path
                            report=report
                            on_edit=on_edit
                            depth=depth
                        />
                    }.into_any(),
                    ElementKind::Object { fields, .. } => view! {
                        <GroupField
                            fields=fields.clone()
                            value=value
                            path=path
                            report=report
                            on_edit=on_edit
                            depth=depth
                        />
                    }.into_any(),
                }
            }}

            <ul class="mt-1">
                {move || messages().into_iter().map(|msg| view! {
                    <li class="text-xs text-red-600">{msg}</li>
                }).collect_view()}
            </ul>
        </div>
    }
}
