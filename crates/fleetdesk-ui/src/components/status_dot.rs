use fleetdesk_types::DeviceStatus;
use leptos::prelude::*;

#[component]
pub fn StatusDot(status: DeviceStatus) -> impl IntoView {
    let color = status.indicator_color();
    view! {
        <span class="status-cell">
            <span class=format!("status-dot status-{color}") data-color=color></span>
            {status.to_string()}
        </span>
    }
}
