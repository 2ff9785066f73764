use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::use_client;

const LINKS: [(&str, &str, &str); 5] = [
    ("/", "\u{25A3}", "Dashboard"),
    ("/companies", "\u{2302}", "Companies"),
    ("/devices", "\u{2338}", "Devices"),
    ("/users", "\u{263A}", "Users"),
    ("/roles", "\u{2616}", "Roles"),
];

#[component]
pub fn Nav() -> impl IntoView {
    let pathname = use_location().pathname;
    let client = StoredValue::new(use_client());

    let signOut = move |_| {
        if let Some(client) = client.get_value() {
            client.logout();
        }
        #[cfg(feature = "hydrate")]
        {
            crate::browser::navigate_hard("/login");
        }
    };

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"F"</div>
                <span class="brand-text">"FleetDesk"</span>
            </div>
            <ul class="nav-links">
                {LINKS
                    .into_iter()
                    .map(|(href, icon, label)| {
                        let itemClass = move || {
                            if pathname.get() == href {
                                "nav-item active"
                            } else {
                                "nav-item"
                            }
                        };
                        view! {
                            <li class=itemClass>
                                <a href=href>
                                    <span class="nav-icon">{icon}</span>
                                    <span>{label}</span>
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <button class="btn btn-ghost nav-logout" on:click=signOut>
                "Sign out"
            </button>
        </nav>
    }
}
