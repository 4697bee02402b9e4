//! Scalar Field Renderers
//!
//! Text, number, switch and enum inputs. Each one turns DOM events into an
//! `Edit` and leaves coercion to the element tree.

use cylc_forms::model::Edit;
use cylc_forms::registry::{coerce_number, Props};
use leptos::prelude::*;
use leptos::web_sys;
use serde_json::Value;
use wasm_bindgen::JsCast;

/// Input classes for the filled / rounded / dense props
fn input_class(props: &Props) -> String {
    let background = if props.filled { "bg-gray-100" } else { "bg-white" };
    let corners = if props.rounded { "rounded-full" } else { "rounded-md" };
    let padding = if props.dense { "px-3 py-1" } else { "px-3 py-2" };
    format!(
        "w-full text-sm border border-gray-300 focus:outline-none focus:ring-2 focus:ring-blue-500 {} {} {}",
        background, corners, padding
    )
}

/// Fit typed text into a mask where `#` is a digit slot
///
/// Literal mask characters are inserted as the user reaches them; anything
/// typed past the end of the mask is dropped.
pub fn apply_mask(mask: &str, text: &str) -> String {
    let mut digits = text.chars().filter(|c| c.is_ascii_digit()).peekable();
    let mut out = String::new();
    for slot in mask.chars() {
        if digits.peek().is_none() {
            break;
        }
        if slot == '#' {
            if let Some(d) = digits.next() {
                out.push(d);
            }
        } else {
            out.push(slot);
        }
    }
    out
}

// ============================================================================
// Text Input
// ============================================================================

#[component]
pub fn TextInput(props: Props, value: Signal<Value>, on_edit: Callback<Edit>) -> impl IntoView {
    let mask = props.mask.clone();

    let on_input = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        let text = match &mask {
            Some(mask) => apply_mask(mask, &text),
            None => text,
        };
        on_edit.run(Edit::Text(text));
    };

    view! {
        <input
            type=props.input_type.clone().unwrap_or_else(|| "text".to_string())
            class=input_class(&props)
            placeholder=props.placeholder.clone().unwrap_or_default()
            aria-label=props.label.clone().unwrap_or_default()
            required=props.required
            prop:value=move || value.get().as_str().map(String::from).unwrap_or_default()
            on:input=on_input
        />
    }
}

// ============================================================================
// Number Input
// ============================================================================

/// Text to show in a number box holding `model`
///
/// Partial input such as `1.` or `-` stays in the box while it still coerces
/// to the model value; any other model change replaces it.
pub fn number_text(model: &Value, typed: &str) -> String {
    if coerce_number(typed) == *model {
        return typed.to_string();
    }
    match model {
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

#[component]
pub fn NumberInput(props: Props, value: Signal<Value>, on_edit: Callback<Edit>) -> impl IntoView {
    let typed = RwSignal::new(String::new());
    let text = move || value.with(|model| typed.with(|t| number_text(model, t)));

    view! {
        <input
            type="text"
            inputmode="decimal"
            class=input_class(&props)
            aria-label=props.label.clone().unwrap_or_default()
            required=props.required
            prop:value=text
            on:input=move |ev| {
                let raw = event_target_value(&ev);
                typed.set(raw.clone());
                on_edit.run(Edit::Text(raw));
            }
        />
    }
}

// ============================================================================
// Switch
// ============================================================================

#[component]
pub fn SwitchInput(props: Props, value: Signal<Value>, on_edit: Callback<Edit>) -> impl IntoView {
    let color = props.color.clone().unwrap_or_default();

    view! {
        <label class="inline-flex items-center gap-2 cursor-pointer">
            <input
                type="checkbox"
                class="h-4 w-4"
                data-color=color
                prop:checked=move || value.get().as_bool().unwrap_or(false)
                on:change=move |ev| on_edit.run(Edit::Toggle(event_target_checked(&ev)))
            />
            <span class="text-sm text-gray-600">{props.label.clone().unwrap_or_default()}</span>
        </label>
    }
}

// ============================================================================
// Enum Select
// ============================================================================

#[component]
pub fn EnumSelect(
    props: Props,
    values: Vec<String>,
    value: Signal<Value>,
    on_edit: Callback<Edit>,
) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let Some(select) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        else {
            return;
        };
        let choice = select.value();
        if choice.is_empty() {
            on_edit.run(Edit::Input(Value::Null));
        } else {
            on_edit.run(Edit::Choose(choice));
        }
    };

    view! {
        <select
            class=input_class(&props)
            aria-label=props.label.clone().unwrap_or_default()
            prop:value=move || value.get().as_str().map(String::from).unwrap_or_default()
            on:change=on_change
        >
            <option value="">"-- Select --"</option>
            {values.into_iter().map(|val| {
                view! {
                    <option value=val.clone()>{val.clone()}</option>
                }
            }).collect_view()}
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_fills_digit_slots() {
        let mask = "####-##-##T##:##:##";
        assert_eq!(apply_mask(mask, "2020"), "2020");
        assert_eq!(apply_mask(mask, "20200"), "2020-0");
        assert_eq!(apply_mask(mask, "20200102T1230"), "2020-01-02T12:30");
        assert_eq!(apply_mask(mask, "2020-01-02T12:30:00999"), "2020-01-02T12:30:00");
        assert_eq!(apply_mask(mask, "abc"), "");
    }

    #[test]
    fn test_number_text_keeps_partial_input() {
        use serde_json::json;

        assert_eq!(number_text(&json!(1), "1."), "1.");
        assert_eq!(number_text(&json!(1.5), "1.5"), "1.5");
        assert_eq!(number_text(&Value::Null, "-"), "-");
        assert_eq!(number_text(&json!(-3), "-3"), "-3");

        // model replaced from elsewhere
        assert_eq!(number_text(&json!(7), "1."), "7");
        assert_eq!(number_text(&Value::Null, "12"), "");
    }
}
