use fleetdesk_client::views::{CrudPage, Roles};
use fleetdesk_types::{Capability, ResourceCategory, Role};
use leptos::prelude::*;

use crate::components::banner::ErrorBanner;
use crate::components::confirm::ConfirmDialog;
use crate::components::field::TextField;
use crate::components::modal::{Modal, ModalActions};
use crate::components::pager::Pager;
use crate::components::toast::ToastContext;
use crate::state::{
    field_error, form_setter, form_value, is_submitting, page_error, spawn_delete, spawn_refresh,
    spawn_submit, use_client,
};

type RolesState = RwSignal<CrudPage<Roles>>;

#[component]
pub fn RolesPage() -> impl IntoView {
    let client = StoredValue::new(use_client());
    let toasts = use_context::<ToastContext>();
    let state: RolesState = RwSignal::new(CrudPage::new());

    #[cfg(feature = "hydrate")]
    {
        spawn_refresh(client.get_value(), state);
    }

    let rows = Memo::new(move |_| state.with(|page| page.visible_rows().to_vec()));
    let loading = Memo::new(move |_| state.with(|page| page.loading));
    let modalMode = Memo::new(move |_| state.with(|page| page.modal.as_ref().map(|m| m.mode.clone())));
    let pendingDelete = Memo::new(move |_| state.with(|page| page.pending_delete.clone()));

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        spawn_submit(client.get_value(), state, toasts);
    };

    view! {
        <div class="dashboard-header page-header">
            <div>
                <h1>"Roles"</h1>
                <p class="subtitle">"Permission sets assigned to users"</p>
            </div>
            <button class="btn btn-primary" on:click=move |_| state.update(|page| page.open_create())>
                "Add role"
            </button>
        </div>
        <ErrorBanner
            message=page_error(state)
            on_dismiss=Callback::new(move |_| state.update(|page| page.dismiss_error()))
        />
        <div class="card table-card">
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Description"</th>
                        <th>"Permissions"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let roles = rows.get();
                        if roles.is_empty() {
                            let text = if loading.get() { "Loading roles..." } else { "No roles defined" };
                            return view! {
                                <tr>
                                    <td colspan="4" class="empty-row">{text}</td>
                                </tr>
                            }
                                .into_any();
                        }
                        roles
                            .into_iter()
                            .map(|role| view! { <RoleRow role=role state=state /> })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>
            <Pager
                page=Signal::derive(move || state.with(|page| page.pagination.page))
                page_count=Signal::derive(move || state.with(|page| page.page_count()))
                on_change=Callback::new(move |page: usize| state.update(|p| p.set_page(page)))
            />
        </div>
        {move || {
            modalMode
                .get()
                .map(|mode| {
                    let title = if mode.is_edit() { "Edit role" } else { "Add role" };
                    view! {
                        <Modal title=title.to_string() on_close=Callback::new(move |_| state.update(|page| page.close_modal()))>
                            <form on:submit=submit>
                                <TextField
                                    label="Name"
                                    value=form_value(state, |f| f.name.clone())
                                    error=field_error(state, "name")
                                    on_input=form_setter(state, |f, v| f.name = v)
                                />
                                <TextField
                                    label="Description"
                                    value=form_value(state, |f| f.description.clone())
                                    error=field_error(state, "description")
                                    on_input=form_setter(state, |f, v| f.description = v)
                                />
                                <PermissionGrid state=state />
                                <ModalActions
                                    submitting=is_submitting(state)
                                    submit_label="Save"
                                    on_cancel=Callback::new(move |_| state.update(|page| page.close_modal()))
                                />
                            </form>
                        </Modal>
                    }
                })
        }}
        {move || {
            pendingDelete
                .get()
                .map(|id| {
                    let name = state
                        .with_untracked(|page| page.find(&id).map(|role| role.name.clone()))
                        .unwrap_or(id);
                    view! {
                        <ConfirmDialog
                            message=format!("Delete role \"{name}\"?")
                            on_confirm=Callback::new(move |_| spawn_delete(client.get_value(), state, toasts))
                            on_cancel=Callback::new(move |_| state.update(|page| page.cancel_delete()))
                        />
                    }
                })
        }}
    }
}

/// One checkbox per category and capability of the open form's matrix.
#[component]
fn PermissionGrid(state: RolesState) -> impl IntoView {
    view! {
        <table class="permission-grid">
            <thead>
                <tr>
                    <th></th>
                    {Capability::ALL
                        .into_iter()
                        .map(|capability| view! { <th>{capability.label()}</th> })
                        .collect_view()}
                </tr>
            </thead>
            <tbody>
                {ResourceCategory::ALL
                    .into_iter()
                    .map(|category| {
                        view! {
                            <tr>
                                <th>{category.label()}</th>
                                {Capability::ALL
                                    .into_iter()
                                    .map(|capability| {
                                        let checked = move || {
                                            state.with(|page| {
                                                page.modal
                                                    .as_ref()
                                                    .is_some_and(|modal| modal.form.permissions.allows(category, capability))
                                            })
                                        };
                                        let toggle = move |ev: leptos::ev::Event| {
                                            let value = event_target_checked(&ev);
                                            state.update(|page| {
                                                if let Some(form) = page.form_mut() {
                                                    form.permissions.category_mut(category).set(capability, value);
                                                }
                                            });
                                        };
                                        view! {
                                            <td>
                                                <input type="checkbox" prop:checked=checked on:change=toggle />
                                            </td>
                                        }
                                    })
                                    .collect_view()}
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

#[component]
fn RoleRow(role: Role, state: RolesState) -> impl IntoView {
    let editId = role.id.clone();
    let deleteId = role.id.clone();
    let total = ResourceCategory::ALL.len() * Capability::ALL.len();
    let summary = ResourceCategory::ALL
        .iter()
        .map(|&category| {
            let granted: Vec<&str> = Capability::ALL
                .iter()
                .filter(|&&capability| role.permissions.allows(category, capability))
                .map(Capability::label)
                .collect();
            if granted.is_empty() {
                format!("{}: none", category.label())
            } else {
                format!("{}: {}", category.label(), granted.join(", "))
            }
        })
        .collect::<Vec<_>>();

    view! {
        <tr>
            <td>{role.name.clone()}</td>
            <td>{role.description.clone()}</td>
            <td>
                <span class="badge">{format!("{} / {total}", role.permissions.granted_count())}</span>
                <ul class="permission-summary">
                    {summary.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                </ul>
            </td>
            <td class="row-actions">
                <button class="btn btn-small" on:click=move |_| state.update(|page| { page.open_edit(&editId); })>
                    "Edit"
                </button>
                <button
                    class="btn btn-small btn-danger"
                    on:click=move |_| state.update(|page| { page.request_delete(&deleteId); })
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
