use fleetdesk_client::ClientConfig;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};

use crate::components::nav::Nav;
use crate::components::toast::ToastProvider;
use crate::pages::companies::CompaniesPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::devices::DevicesPage;
use crate::pages::login::LoginPage;
use crate::pages::roles::RolesPage;
use crate::pages::users::UsersPage;

/// Carries the server's configured API root to the browser bundle.
pub const API_URL_META: &str = "fleetdesk-api-url";

pub fn shell(options: LeptosOptions) -> impl IntoView {
    let apiUrl = use_context::<ClientConfig>().map(|config| config.base_url);

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                {apiUrl.map(|url| view! { <meta name=API_URL_META content=url /> })}
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Only the browser talks to the API; server rendering shows loading states.
    #[cfg(feature = "hydrate")]
    {
        if let Some(client) = crate::browser::build_client() {
            provide_context(client);
        }
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/fleetdesk-console.css" />
        <Title text="FleetDesk" />
        <ToastProvider>
            <Router>
                <Routes fallback=|| view! { <p>"Page not found."</p> }.into_any()>
                    <Route path=StaticSegment("login") view=LoginPage />
                    <Route path=StaticSegment("") view=|| view! { <Layout><DashboardPage /></Layout> } />
                    <Route path=StaticSegment("companies") view=|| view! { <Layout><CompaniesPage /></Layout> } />
                    <Route path=StaticSegment("devices") view=|| view! { <Layout><DevicesPage /></Layout> } />
                    <Route path=StaticSegment("users") view=|| view! { <Layout><UsersPage /></Layout> } />
                    <Route path=StaticSegment("roles") view=|| view! { <Layout><RolesPage /></Layout> } />
                </Routes>
            </Router>
        </ToastProvider>
    }
}

#[component]
fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Nav />
            <main class="main-content">{children()}</main>
        </div>
    }
}
