use leptos::prelude::*;

/// Titled card for one dashboard figure.
#[component]
pub fn StatCard(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="card">
            <div class="card-title">{title}</div>
            {children()}
        </div>
    }
}

#[component]
pub fn StatRow(label: &'static str, value: u64, #[prop(optional)] tone: &'static str) -> impl IntoView {
    view! {
        <div class="stat-row">
            <span class="stat-label">{label}</span>
            <span class=format!("stat-value {tone}")>{value}</span>
        </div>
    }
}
