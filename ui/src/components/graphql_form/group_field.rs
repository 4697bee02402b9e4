use cylc_forms::model::{Edit, PropertyPath, ValidationReport};
use cylc_forms::resolver::FormElement;
use leptos::prelude::*;
use serde_json::Value;

use super::generator::FormField;

/// Named fields of an input object or argument list, laid out together
#[component]
pub fn GroupField(
    fields: Vec<FormElement>,
    value: Signal<Value>,
    path: PropertyPath,
    report: Memo<ValidationReport>,
    on_edit: Callback<Edit>,
    depth: usize,
) -> impl IntoView {
    view! {
        <div class="space-y-2">
            {fields.into_iter().map(|field| {
                let name = field.name.clone();
                let field_path = path.push_property(&name);

                let key = name.clone();
                let field_value = Signal::derive(move || {
                    value.get().get(&key).cloned().unwrap_or(Value::Null)
                });
                let field_edit = Callback::new(move |edit: Edit| {
                    on_edit.run(Edit::field(name.clone(), edit))
                });

                view! {
                    <FormField
                        element=field
                        value=field_value
                        path=field_path
                        report=report
                        on_edit=field_edit
                        depth=depth + 1
                    />
                }
            }).collect_view()}
        </div>
    }
}
