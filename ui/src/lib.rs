use leptos::prelude::*;
use leptos_router::components::{Router, Route, Routes, A};
use leptos_router::path;

mod components;

use components::graphql_form::GraphqlForm;
use components::task_filter::TaskTable;
use cylc_forms::filter::TaskRow;
use cylc_forms::mutation::{variables_of, MutationForm};
use cylc_forms::registry::Registry;
use cylc_forms::resolver::Resolver;
use cylc_forms::schema::SchemaIndex;
use serde_json::Value;

const INTROSPECTION: &str = include_str!("../../tests/fixtures/introspection.json");
const TASKS: &str = include_str!("../fixtures/tasks.json");

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div class="flex h-screen bg-gray-100">
                // Sidebar
                <div class="w-64 bg-gray-800 text-white p-4 flex flex-col">
                    <h1 class="text-2xl font-bold mb-8">"Cylc Forms"</h1>
                    <nav class="space-y-1 flex-1">
                        <NavLink href="/" label="Mutations" />
                        <NavLink href="/tasks" label="Tasks" />
                    </nav>
                </div>

                // Main Content
                <div class="flex-1 overflow-y-auto p-6">
                    <Routes fallback=|| "Not found.">
                        <Route path=path!("/") view=Mutations/>
                        <Route path=path!("/tasks") view=Tasks/>
                    </Routes>
                </div>
            </div>
        </Router>
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A href=href attr:class="block p-2 hover:bg-gray-700 rounded transition-colors">
            {label}
        </A>
    }
}

/// Mutation picker, the generated form, and the variables it produces
#[component]
fn Mutations() -> impl IntoView {
    let schema = match SchemaIndex::from_introspection(INTROSPECTION) {
        Ok(schema) => schema,
        Err(e) => {
            return view! { <div class="text-red-600">{e.to_string()}</div> }.into_any();
        }
    };

    let names: Vec<String> = schema
        .mutations()
        .map(|m| m.iter().map(|f| f.name.clone()).collect())
        .unwrap_or_default();
    let selected = RwSignal::new(names.first().cloned().unwrap_or_default());

    let schema = StoredValue::new(schema);
    let registry = StoredValue::new(Registry::default());

    view! {
        <div class="max-w-3xl space-y-4">
            <select
                class="px-3 py-2 border border-gray-300 rounded-md bg-white"
                prop:value=move || selected.get()
                on:change=move |ev| selected.set(event_target_value(&ev))
            >
                {names.into_iter().map(|name| view! {
                    <option value=name.clone()>{name.clone()}</option>
                }).collect_view()}
            </select>

            {move || {
                let name = selected.get();
                let built = schema.with_value(|schema| {
                    registry.with_value(|registry| {
                        let resolver = Resolver::new(registry, schema);
                        MutationForm::new(schema, &resolver, &name)
                    })
                });

                match built {
                    Ok(form) => {
                        let element = form.form().element().clone();
                        let model = RwSignal::new(form.form().model().clone());
                        let description = form.description().map(String::from);

                        let element_for_vars = element.clone();
                        let variables = move || {
                            let vars = variables_of(&element_for_vars, &model.get());
                            serde_json::to_string_pretty(&vars).unwrap_or_default()
                        };
                        let on_input = Callback::new(move |value: Value| {
                            log::debug!("{} input: {}", name, value);
                        });

                        view! {
                            <div class="bg-white rounded-lg shadow p-4 space-y-3">
                                {description.map(|d| view! { <p class="text-sm text-gray-600">{d}</p> })}
                                <GraphqlForm element=element model=model on_input=on_input />
                                <pre class="text-xs bg-gray-50 rounded p-2 overflow-x-auto">{variables}</pre>
                            </div>
                        }.into_any()
                    }
                    Err(e) => view! { <div class="text-red-600">{e.to_string()}</div> }.into_any(),
                }
            }}
        </div>
    }
    .into_any()
}

#[component]
fn Tasks() -> impl IntoView {
    let rows: Vec<TaskRow> = serde_json::from_str(TASKS).unwrap_or_else(|e| {
        log::error!("Invalid task fixture: {}", e);
        Vec::new()
    });

    view! { <TaskTable tasks=Signal::derive(move || rows.clone()) /> }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}
