use fleetdesk_client::views::DashboardState;
use leptos::prelude::*;

use crate::components::banner::ErrorBanner;
use crate::components::ratio_ring::{ratio_color, RatioRing};
use crate::components::stat_card::{StatCard, StatRow};
#[cfg(feature = "hydrate")]
use crate::state::use_client;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = RwSignal::new(DashboardState::default());

    #[cfg(feature = "hydrate")]
    {
        use fleetdesk_client::views::{dashboard, DASHBOARD_POLL_INTERVAL};
        use wasm_bindgen_futures::spawn_local;

        let client = StoredValue::new(use_client());
        let fetch = move || {
            let Some(client) = client.get_value() else {
                return;
            };
            spawn_local(async move {
                let (devices, companies) = dashboard::fetch(&client).await;
                state.update(|s| s.apply(devices, companies));
            });
        };

        fetch();

        // Numbers are replaced in place; the cards never drop back to loading.
        match set_interval_with_handle(fetch, DASHBOARD_POLL_INTERVAL) {
            Ok(handle) => on_cleanup(move || handle.clear()),
            Err(e) => tracing::warn!("failed to start dashboard polling: {e:?}"),
        }
    }

    view! {
        <div class="dashboard-header">
            <h1>"Dashboard"</h1>
            <p class="subtitle">"Fleet health at a glance"</p>
        </div>
        <ErrorBanner
            message=Signal::derive(move || state.with(|s| s.error.clone()))
            on_dismiss=Callback::new(move |_| state.update(|s| s.error = None))
        />
        {move || {
            if state.with(DashboardState::is_loading) {
                return view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading fleet statistics..."
                    </div>
                }
                    .into_any();
            }

            let snapshot = state.get();
            let onlineRatio = snapshot.online_ratio();
            let devices = snapshot.device_stats.unwrap_or_default();
            let companies = snapshot.company_stats.unwrap_or_default();

            view! {
                <div class="dashboard-grid">
                    <StatCard title="Devices">
                        <StatRow label="Total" value=devices.total />
                        <StatRow label="Online" value=devices.online tone="tone-green" />
                        <StatRow label="Offline" value=devices.offline tone="tone-red" />
                        <StatRow label="Maintenance" value=devices.maintenance tone="tone-amber" />
                    </StatCard>
                    <StatCard title="Online">
                        <RatioRing
                            value=onlineRatio
                            label=format!("{} of {} devices", devices.online, devices.total)
                            color=ratio_color(onlineRatio)
                        />
                    </StatCard>
                    <StatCard title="Companies">
                        <StatRow label="Total" value=companies.total />
                        <StatRow label="Active" value=companies.active tone="tone-green" />
                        <StatRow label="Inactive" value=companies.inactive tone="tone-red" />
                    </StatCard>
                </div>
            }
                .into_any()
        }}
    }
}
