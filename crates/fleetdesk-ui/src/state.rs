//! Glue between the page view-models and Leptos signals.
//!
//! Each helper applies the pure state transition up front, runs the request
//! on the local executor and applies the result when it lands. Without a
//! client (server rendering) they do nothing.

use fleetdesk_client::views::{CrudPage, ReferenceData, Resource};
use fleetdesk_client::AuthClient;
use fleetdesk_types::forms::FormMode;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::toast::{ToastContext, ToastLevel};

/// API client provided by `App` in the browser; absent during server rendering.
pub fn use_client() -> Option<AuthClient> {
    use_context::<AuthClient>()
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn spawn_refresh<R: Resource>(client: Option<AuthClient>, state: RwSignal<CrudPage<R>>) {
    let Some(client) = client else {
        return;
    };

    state.update(|page| page.begin_load());
    spawn_local(async move {
        let result = R::list(&client).await;
        state.update(|page| page.apply_list(result));
    });
}

/// Lookup lists for the dialog's selects. Roles are only fetched when the
/// page offers them.
pub fn spawn_reference(client: Option<AuthClient>, reference: RwSignal<ReferenceData>, withRoles: bool) {
    let Some(client) = client else {
        return;
    };

    spawn_local(async move {
        let result = if withRoles {
            ReferenceData::load_all(&client).await
        } else {
            ReferenceData::load_companies(&client).await
        };
        match result {
            Ok(data) => reference.set(data),
            Err(e) => tracing::warn!("failed to load reference data: {e}"),
        }
    });
}

pub fn spawn_submit<R: Resource>(
    client: Option<AuthClient>,
    state: RwSignal<CrudPage<R>>,
    toasts: Option<ToastContext>,
) {
    let Some(client) = client else {
        return;
    };
    let Some((mode, payload)) = state.try_update(|page| page.prepare_submit()).flatten() else {
        return;
    };

    spawn_local(async move {
        let result = match &mode {
            FormMode::Create => R::create(&client, &payload).await,
            FormMode::Edit { id } => R::update(&client, id, &payload).await,
        };

        let saved = state
            .try_update(|page| page.apply_submit(result))
            .unwrap_or(false);
        if saved {
            if let Some(toasts) = toasts {
                let verb = if mode.is_edit() { "updated" } else { "created" };
                toasts.push(format!("{} {verb}", capitalized(R::NAME)), ToastLevel::Success);
            }
            spawn_refresh(Some(client), state);
        }
    });
}

pub fn spawn_delete<R: Resource>(
    client: Option<AuthClient>,
    state: RwSignal<CrudPage<R>>,
    toasts: Option<ToastContext>,
) {
    let Some(client) = client else {
        return;
    };
    let Some(id) = state.try_update(|page| page.take_confirmed_delete()).flatten() else {
        return;
    };

    spawn_local(async move {
        let result = R::delete(&client, &id).await;
        let deleted = state
            .try_update(|page| page.apply_delete(result))
            .unwrap_or(false);
        if deleted {
            if let Some(toasts) = toasts {
                toasts.push(format!("{} deleted", capitalized(R::NAME)), ToastLevel::Success);
            }
            spawn_refresh(Some(client), state);
        }
    });
}

/// Current value of one field of the open dialog.
pub fn form_value<R: Resource>(
    state: RwSignal<CrudPage<R>>,
    read: fn(&R::Form) -> String,
) -> Signal<String> {
    Signal::derive(move || {
        state.with(|page| {
            page.modal
                .as_ref()
                .map(|modal| read(&modal.form))
                .unwrap_or_default()
        })
    })
}

pub fn form_flag<R: Resource>(state: RwSignal<CrudPage<R>>, read: fn(&R::Form) -> bool) -> Signal<bool> {
    Signal::derive(move || {
        state.with(|page| page.modal.as_ref().is_some_and(|modal| read(&modal.form)))
    })
}

/// Writes into the open dialog's form; ignored when no dialog is open.
pub fn form_setter<R: Resource>(
    state: RwSignal<CrudPage<R>>,
    write: fn(&mut R::Form, String),
) -> Callback<String> {
    Callback::new(move |value: String| {
        state.update(|page| {
            if let Some(form) = page.form_mut() {
                write(form, value);
            }
        })
    })
}

pub fn form_toggle<R: Resource>(
    state: RwSignal<CrudPage<R>>,
    write: fn(&mut R::Form, bool),
) -> Callback<bool> {
    Callback::new(move |value: bool| {
        state.update(|page| {
            if let Some(form) = page.form_mut() {
                write(form, value);
            }
        })
    })
}

pub fn field_error<R: Resource>(state: RwSignal<CrudPage<R>>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || {
        state.with(|page| {
            page.modal
                .as_ref()
                .and_then(|modal| modal.errors.get(field).map(str::to_string))
        })
    })
}

pub fn page_error<R: Resource>(state: RwSignal<CrudPage<R>>) -> Signal<Option<String>> {
    Signal::derive(move || state.with(|page| page.error.clone()))
}

pub fn is_submitting<R: Resource>(state: RwSignal<CrudPage<R>>) -> Signal<bool> {
    Signal::derive(move || state.with(|page| page.modal.as_ref().is_some_and(|modal| modal.submitting)))
}
