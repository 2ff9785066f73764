use fleetdesk_client::views::{CrudPage, ReferenceData, Users};
use fleetdesk_types::User;
use leptos::prelude::*;

use super::{activity_options, company_label, company_options, format_timestamp};
use crate::components::banner::ErrorBanner;
use crate::components::confirm::ConfirmDialog;
use crate::components::field::{SelectField, TextField};
use crate::components::modal::{Modal, ModalActions};
use crate::components::pager::Pager;
use crate::components::toast::ToastContext;
use crate::state::{
    field_error, form_setter, form_value, is_submitting, page_error, spawn_delete,
    spawn_reference, spawn_refresh, spawn_submit, use_client,
};

type UsersState = RwSignal<CrudPage<Users>>;

#[component]
pub fn UsersPage() -> impl IntoView {
    let client = StoredValue::new(use_client());
    let toasts = use_context::<ToastContext>();
    let state: UsersState = RwSignal::new(CrudPage::new());
    let reference = RwSignal::new(ReferenceData::default());

    #[cfg(feature = "hydrate")]
    {
        spawn_refresh(client.get_value(), state);
        spawn_reference(client.get_value(), reference, true);
    }

    let rows = Memo::new(move |_| state.with(|page| page.visible_rows().to_vec()));
    let loading = Memo::new(move |_| state.with(|page| page.loading));
    let modalMode = Memo::new(move |_| state.with(|page| page.modal.as_ref().map(|m| m.mode.clone())));
    let pendingDelete = Memo::new(move |_| state.with(|page| page.pending_delete.clone()));

    let roleOptions = Signal::derive(move || {
        reference.with(|data| {
            data.role_names()
                .into_iter()
                .map(|name| (name.to_string(), name.to_string()))
                .collect::<Vec<_>>()
        })
    });

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        spawn_submit(client.get_value(), state, toasts);
    };

    view! {
        <div class="dashboard-header page-header">
            <div>
                <h1>"Users"</h1>
                <p class="subtitle">"Console accounts and their roles"</p>
            </div>
            <button class="btn btn-primary" on:click=move |_| state.update(|page| page.open_create())>
                "Add user"
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
                        <th>"Email"</th>
                        <th>"Role"</th>
                        <th>"Status"</th>
                        <th>"Company"</th>
                        <th>"Created"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let users = rows.get();
                        if users.is_empty() {
                            let text = if loading.get() { "Loading users..." } else { "No users yet" };
                            return view! {
                                <tr>
                                    <td colspan="7" class="empty-row">{text}</td>
                                </tr>
                            }
                                .into_any();
                        }
                        users
                            .into_iter()
                            .map(|user| view! { <UserRow user=user state=state reference=reference /> })
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
                    let isEdit = mode.is_edit();
                    let title = if isEdit { "Edit user" } else { "Add user" };
                    let passwordLabel = if isEdit { "New password (leave blank to keep)" } else { "Password" };
                    view! {
                        <Modal title=title.to_string() on_close=Callback::new(move |_| state.update(|page| page.close_modal()))>
                            <form on:submit=submit>
                                <TextField
                                    label="Email"
                                    input_type="email"
                                    value=form_value(state, |f| f.email.clone())
                                    error=field_error(state, "email")
                                    on_input=form_setter(state, |f, v| f.email = v)
                                />
                                <TextField
                                    label="Name"
                                    value=form_value(state, |f| f.name.clone())
                                    error=field_error(state, "name")
                                    on_input=form_setter(state, |f, v| f.name = v)
                                />
                                <SelectField
                                    label="Role"
                                    options=roleOptions
                                    placeholder="Select a role"
                                    value=form_value(state, |f| f.role.clone())
                                    error=field_error(state, "role")
                                    on_change=form_setter(state, |f, v| f.role = v)
                                />
                                <SelectField
                                    label="Status"
                                    options=activity_options()
                                    value=form_value(state, |f| f.status.clone())
                                    error=field_error(state, "status")
                                    on_change=form_setter(state, |f, v| f.status = v)
                                />
                                <SelectField
                                    label="Company"
                                    options=company_options(reference)
                                    placeholder="No company"
                                    value=form_value(state, |f| f.company_id.clone())
                                    error=field_error(state, "company_id")
                                    on_change=form_setter(state, |f, v| f.company_id = v)
                                />
                                <TextField
                                    label=passwordLabel
                                    input_type="password"
                                    value=form_value(state, |f| f.password.clone())
                                    error=field_error(state, "password")
                                    on_input=form_setter(state, |f, v| f.password = v)
                                />
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
                        .with_untracked(|page| page.find(&id).map(|user| user.email.clone()))
                        .unwrap_or(id);
                    view! {
                        <ConfirmDialog
                            message=format!("Delete user {name}?")
                            on_confirm=Callback::new(move |_| spawn_delete(client.get_value(), state, toasts))
                            on_cancel=Callback::new(move |_| state.update(|page| page.cancel_delete()))
                        />
                    }
                })
        }}
    }
}

#[component]
fn UserRow(user: User, state: UsersState, reference: RwSignal<ReferenceData>) -> impl IntoView {
    let editId = user.id.clone();
    let deleteId = user.id.clone();
    let company = company_label(reference, user.company_id.clone());
    let statusClass = format!("badge badge-{}", user.status.as_str().to_lowercase());

    view! {
        <tr>
            <td>{user.name.clone()}</td>
            <td>{user.email.clone()}</td>
            <td>{user.role.clone()}</td>
            <td>
                <span class=statusClass>{user.status.to_string()}</span>
            </td>
            <td>{company}</td>
            <td>{format_timestamp(user.created_at, "-")}</td>
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
