use leptos::prelude::*;

/// Dismissible page-level error banner; renders nothing without a message.
#[component]
pub fn ErrorBanner(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(into)] on_dismiss: Callback<()>,
) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class="banner banner-error" role="alert">
                    <span>{text}</span>
                    <button class="banner-close" on:click=move |_| on_dismiss.run(())>
                        "\u{00D7}"
                    </button>
                </div>
            }
        })
    }
}
