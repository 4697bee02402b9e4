//! Task table with name and state filtering.

use cylc_forms::filter::{filter_tasks, TaskFilter, TaskRow, TaskState};
use leptos::prelude::*;

/// Search box and state toggles
#[component]
pub fn TaskFilterBar(
    filter: RwSignal<TaskFilter>,
    #[prop(into, default = "Filter by task name".to_string())]
    placeholder: String,
) -> impl IntoView {
    let (show_states, set_show_states) = signal(false);

    let selected_count = move || filter.with(|f| f.states.len());

    view! {
        <div class="flex items-center gap-3 mb-4">
            <input
                type="text"
                class="block w-full max-w-md px-3 py-2 border border-gray-300 rounded-md bg-white placeholder-gray-500 focus:outline-none focus:ring-2 focus:ring-blue-500 sm:text-sm"
                placeholder=placeholder
                prop:value=move || filter.with(|f| f.name.clone().unwrap_or_default())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    filter.update(|f| f.name = Some(text));
                }
            />

            <div class="relative">
                <button
                    type="button"
                    class="px-3 py-2 border border-gray-300 rounded-md text-sm bg-white hover:bg-gray-50"
                    on:click=move |_| set_show_states.update(|v| *v = !*v)
                >
                    {move || match selected_count() {
                        0 => "States".to_string(),
                        n => format!("States ({})", n),
                    }}
                </button>

                {move || show_states.get().then(|| view! {
                    <div class="absolute z-10 mt-1 w-48 bg-white border border-gray-200 rounded-md shadow-lg p-2">
                        {TaskState::ALL.into_iter().map(|state| {
                            let is_checked = move || filter.with(|f| f.states.contains(&state));
                            view! {
                                <label class="flex items-center gap-2 px-2 py-1 text-sm hover:bg-gray-50 cursor-pointer">
                                    <input
                                        type="checkbox"
                                        prop:checked=is_checked
                                        on:change=move |_| filter.update(|f| {
                                            if let Some(pos) = f.states.iter().position(|s| *s == state) {
                                                f.states.remove(pos);
                                            } else {
                                                f.states.push(state);
                                            }
                                        })
                                    />
                                    <span class=format!("task-state task-state-{}", state)>{state.to_string()}</span>
                                </label>
                            }
                        }).collect_view()}
                    </div>
                })}
            </div>

            {move || filter.with(|f| f.is_active()).then(|| view! {
                <button
                    type="button"
                    class="text-sm text-gray-500 hover:text-gray-700"
                    on:click=move |_| filter.set(TaskFilter::default())
                >
                    "Clear"
                </button>
            })}
        </div>
    }
}

/// Filtered task rows
#[component]
pub fn TaskTable(#[prop(into)] tasks: Signal<Vec<TaskRow>>) -> impl IntoView {
    let filter = RwSignal::new(TaskFilter::default());

    let visible = Memo::new(move |_| {
        let rows = tasks.get();
        let current = filter.get();
        filter_tasks(&rows, &current)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    });

    view! {
        <div>
            <TaskFilterBar filter=filter />
            <table class="min-w-full divide-y divide-gray-200 bg-white rounded-lg">
                <thead class="bg-gray-50">
                    <tr>
                        <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase">"Task"</th>
                        <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase">"State"</th>
                        <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase">"Cycle Point"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200">
                    {move || visible.get().into_iter().map(|row| view! {
                        <tr>
                            <td class="px-4 py-2 text-sm text-gray-900">{row.name}</td>
                            <td class="px-4 py-2 text-sm">{row.state.to_string()}</td>
                            <td class="px-4 py-2 text-sm text-gray-500">{row.cycle_point.unwrap_or_default()}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
            {move || visible.with(|rows| rows.is_empty()).then(|| view! {
                <div class="text-sm text-gray-400 italic p-3 text-center">"No tasks match the filter."</div>
            })}
        </div>
    }
}
