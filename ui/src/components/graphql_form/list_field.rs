//! List Field Component
//!
//! Repeatable rows of one item renderer with add/remove.

use cylc_forms::model::{Edit, PropertyPath, ValidationReport};
use cylc_forms::resolver::FormElement;
use leptos::prelude::*;
use serde_json::Value;

use super::generator::FormField;

#[component]
pub fn ListField(
    item: FormElement,
    value: Signal<Value>,
    path: PropertyPath,
    report: Memo<ValidationReport>,
    on_edit: Callback<Edit>,
    depth: usize,
) -> impl IntoView {
    // Rows are rebuilt only when the count changes, not on every keystroke
    let row_count = Memo::new(move |_| value.get().as_array().map_or(0, |rows| rows.len()));

    view! {
        <div class="border border-gray-200 rounded-lg p-3 bg-gray-50">
            <div class="flex items-center justify-between mb-2">
                <span class="text-xs text-gray-500">
                    {move || format!("Items: {}", row_count.get())}
                </span>
                <button
                    type="button"
                    class="px-2 py-1 text-xs rounded text-blue-600 hover:bg-blue-50"
                    on:click=move |_| on_edit.run(Edit::AddRow)
                >
                    "Add Item"
                </button>
            </div>

            {move || {
                let count = row_count.get();
                if count == 0 {
                    return view! {
                        <div class="text-sm text-gray-400 italic p-3 text-center">
                            "No items. Click \"Add Item\" to add one."
                        </div>
                    }.into_any();
                }

                view! {
                    <div class="space-y-2">
                        {(0..count).map(|idx| {
                            let row_value = Signal::derive(move || {
                                value.get().get(idx).cloned().unwrap_or(Value::Null)
                            });
                            let row_edit = Callback::new(move |edit: Edit| on_edit.run(Edit::row(idx, edit)));

                            view! {
                                <div class="border border-gray-200 rounded-lg p-2 bg-white">
                                    <div class="flex items-center justify-between">
                                        <span class="text-xs font-medium text-gray-600">
                                            {format!("#{}", idx + 1)}
                                        </span>
                                        <button
                                            type="button"
                                            class="text-xs text-red-500 hover:bg-red-50 p-1 rounded"
                                            on:click=move |_| on_edit.run(Edit::RemoveRow(idx))
                                        >
                                            "Remove"
                                        </button>
                                    </div>
                                    <FormField
                                        element=item.clone()
                                        value=row_value
                                        path=path.push_index(idx)
                                        report=report
                                        on_edit=row_edit
                                        depth=depth + 1
                                    />
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}
