//! Labelled form input bound to a string signal.

use leptos::prelude::*;

use crate::util::form::FormErrors;

/// One input plus the error recorded for `name` in `errors`.
#[component]
pub fn Field(
    label: &'static str,
    name: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FormErrors>,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(name));

    view! {
        <label class="field">
            <span class="field__label">{label}</span>
            <input
                class="field__input"
                type=input_type
                name=name
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <Show when=move || error().is_some()>
                <span class="field__error">{move || error().unwrap_or_default()}</span>
            </Show>
        </label>
    }
}

/// Checkbox bound to a bool signal.
#[component]
pub fn CheckField(label: &'static str, value: RwSignal<bool>) -> impl IntoView {
    view! {
        <label class="field field--check">
            <input
                type="checkbox"
                prop:checked=move || value.get()
                on:change=move |ev| value.set(event_target_checked(&ev))
            />
            <span class="field__label">{label}</span>
        </label>
    }
}

/// `<select>` over `(value, label)` pairs with a blank placeholder.
#[component]
pub fn SelectField(
    label: &'static str,
    name: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FormErrors>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(name));

    view! {
        <label class="field">
            <span class="field__label">{label}</span>
            <select
                class="field__input"
                name=name
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">"Seleccione..."</option>
                {move || {
                    let selected = value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|(v, text)| {
                            let is_selected = v == selected;
                            view! { <option value=v selected=is_selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
            <Show when=move || error().is_some()>
                <span class="field__error">{move || error().unwrap_or_default()}</span>
            </Show>
        </label>
    }
}
