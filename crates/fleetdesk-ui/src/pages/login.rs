use fleetdesk_client::views::LoginState;
use leptos::prelude::*;

use crate::components::banner::ErrorBanner;
use crate::components::field::TextField;
#[cfg(feature = "hydrate")]
use crate::state::use_client;

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = RwSignal::new(LoginState::default());
    #[cfg(feature = "hydrate")]
    let client = StoredValue::new(use_client());

    let fieldError = move |field: &'static str| {
        Signal::derive(move || state.with(|s| s.errors.get(field).map(str::to_string)))
    };

    let handleSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            let Some(client) = client.get_value() else {
                return;
            };
            let Some(request) = state.try_update(|s| s.prepare()).flatten() else {
                return;
            };
            spawn_local(async move {
                let result = client.login(&request).await;
                let signedIn = state.try_update(|s| s.apply(&result)).unwrap_or(false);
                if signedIn {
                    crate::browser::navigate_hard("/");
                }
            });
        }
    };

    let submitting = move || state.with(|s| s.submitting);

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"F"</div>
                    <h1>"FleetDesk"</h1>
                    <p>"Sign in to manage your fleet"</p>
                </div>

                <ErrorBanner
                    message=Signal::derive(move || state.with(|s| s.error.clone()))
                    on_dismiss=Callback::new(move |_| state.update(|s| s.error = None))
                />

                <form on:submit=handleSubmit>
                    <TextField
                        label="Email"
                        input_type="email"
                        value=Signal::derive(move || state.with(|s| s.form.email.clone()))
                        error=fieldError("email")
                        on_input=Callback::new(move |v: String| state.update(|s| s.form.email = v))
                    />
                    <TextField
                        label="Password"
                        input_type="password"
                        value=Signal::derive(move || state.with(|s| s.form.password.clone()))
                        error=fieldError("password")
                        on_input=Callback::new(move |v: String| state.update(|s| s.form.password = v))
                    />
                    <button type="submit" class="btn btn-primary" disabled=submitting>
                        {move || if submitting() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
