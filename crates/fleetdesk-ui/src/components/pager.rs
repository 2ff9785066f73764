use leptos::prelude::*;

/// Previous/next controls over zero-based pages.
#[component]
pub fn Pager(
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] page_count: Signal<usize>,
    #[prop(into)] on_change: Callback<usize>,
) -> impl IntoView {
    let atStart = move || page.get() == 0;
    let atEnd = move || page.get() + 1 >= page_count.get();

    view! {
        <div class="pager">
            <button
                class="btn btn-ghost"
                disabled=atStart
                on:click=move |_| on_change.run(page.get_untracked().saturating_sub(1))
            >
                "Previous"
            </button>
            <span class="pager-label">
                {move || format!("Page {} of {}", page.get() + 1, page_count.get())}
            </span>
            <button
                class="btn btn-ghost"
                disabled=atEnd
                on:click=move |_| on_change.run(page.get_untracked() + 1)
            >
                "Next"
            </button>
        </div>
    }
}
