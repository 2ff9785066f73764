use leptos::prelude::*;

fn input_class(error: Option<String>) -> &'static str {
    if error.is_some() {
        "form-input invalid"
    } else {
        "form-input"
    }
}

#[component]
fn FieldError(error: Signal<Option<String>>) -> impl IntoView {
    move || error.get().map(|message| view! { <span class="field-error">{message}</span> })
}

#[component]
pub fn TextField(
    label: &'static str,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type=input_type.unwrap_or("text")
                class=move || input_class(error.get())
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <FieldError error=error />
        </div>
    }
}

/// `options` are `(value, label)` pairs. An empty first option stands for
/// "none" when `placeholder` is given.
#[component]
pub fn SelectField(
    label: &'static str,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(optional)] placeholder: Option<&'static str>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <select
                class=move || input_class(error.get())
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {placeholder.map(|text| view! { <option value="">{text}</option> })}
                {move || {
                    let selected = value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|(optionValue, optionLabel)| {
                            let isSelected = optionValue == selected;
                            view! {
                                <option value=optionValue selected=isSelected>
                                    {optionLabel}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
            <FieldError error=error />
        </div>
    }
}

#[component]
pub fn CheckboxField(
    label: &'static str,
    #[prop(into)] checked: Signal<bool>,
    #[prop(into)] on_toggle: Callback<bool>,
) -> impl IntoView {
    view! {
        <div class="form-group form-check">
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || checked.get()
                    on:change=move |ev| on_toggle.run(event_target_checked(&ev))
                />
                {label}
            </label>
        </div>
    }
}
