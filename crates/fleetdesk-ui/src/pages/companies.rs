use fleetdesk_client::views::{Companies, CrudPage};
use fleetdesk_types::Company;
use leptos::prelude::*;

use super::{activity_options, format_timestamp};
use crate::components::banner::ErrorBanner;
use crate::components::field::{SelectField, TextField};
use crate::components::modal::{Modal, ModalActions};
use crate::components::pager::Pager;
use crate::components::toast::ToastContext;
use crate::state::{
    field_error, form_setter, form_value, is_submitting, page_error, spawn_refresh, spawn_submit,
    use_client,
};

/// Companies can only be listed and created; rows carry no actions.
#[component]
pub fn CompaniesPage() -> impl IntoView {
    let client = StoredValue::new(use_client());
    let toasts = use_context::<ToastContext>();
    let state = RwSignal::new(CrudPage::<Companies>::new());

    #[cfg(feature = "hydrate")]
    {
        spawn_refresh(client.get_value(), state);
    }

    let rows = Memo::new(move |_| state.with(|page| page.visible_rows().to_vec()));
    let loading = Memo::new(move |_| state.with(|page| page.loading));
    let modalOpen = Memo::new(move |_| state.with(|page| page.modal.is_some()));

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        spawn_submit(client.get_value(), state, toasts);
    };

    view! {
        <div class="dashboard-header page-header">
            <div>
                <h1>"Companies"</h1>
                <p class="subtitle">"Customer organisations owning devices and users"</p>
            </div>
            <button class="btn btn-primary" on:click=move |_| state.update(|page| page.open_create())>
                "Add company"
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
                        <th>"Status"</th>
                        <th>"Contact email"</th>
                        <th>"Contact phone"</th>
                        <th>"Address"</th>
                        <th>"Created"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let companies = rows.get();
                        if companies.is_empty() {
                            let text = if loading.get() { "Loading companies..." } else { "No companies yet" };
                            return view! {
                                <tr>
                                    <td colspan="6" class="empty-row">{text}</td>
                                </tr>
                            }
                                .into_any();
                        }
                        companies.into_iter().map(company_row).collect_view().into_any()
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
            modalOpen
                .get()
                .then(|| {
                    view! {
                        <Modal title="Add company".to_string() on_close=Callback::new(move |_| state.update(|page| page.close_modal()))>
                            <form on:submit=submit>
                                <TextField
                                    label="Name"
                                    value=form_value(state, |f| f.name.clone())
                                    error=field_error(state, "name")
                                    on_input=form_setter(state, |f, v| f.name = v)
                                />
                                <SelectField
                                    label="Status"
                                    options=activity_options()
                                    value=form_value(state, |f| f.status.clone())
                                    error=field_error(state, "status")
                                    on_change=form_setter(state, |f, v| f.status = v)
                                />
                                <TextField
                                    label="Contact email"
                                    input_type="email"
                                    value=form_value(state, |f| f.contact_email.clone())
                                    error=field_error(state, "contact_email")
                                    on_input=form_setter(state, |f, v| f.contact_email = v)
                                />
                                <TextField
                                    label="Contact phone"
                                    value=form_value(state, |f| f.contact_phone.clone())
                                    error=field_error(state, "contact_phone")
                                    on_input=form_setter(state, |f, v| f.contact_phone = v)
                                />
                                <TextField
                                    label="Address"
                                    value=form_value(state, |f| f.address.clone())
                                    error=field_error(state, "address")
                                    on_input=form_setter(state, |f, v| f.address = v)
                                />
                                <ModalActions
                                    submitting=is_submitting(state)
                                    submit_label="Create"
                                    on_cancel=Callback::new(move |_| state.update(|page| page.close_modal()))
                                />
                            </form>
                        </Modal>
                    }
                })
        }}
    }
}

fn company_row(company: Company) -> impl IntoView {
    let statusClass = format!("badge badge-{}", company.status.as_str().to_lowercase());
    view! {
        <tr>
            <td>{company.name}</td>
            <td>
                <span class=statusClass>{company.status.to_string()}</span>
            </td>
            <td>{company.contact_email}</td>
            <td>{company.contact_phone}</td>
            <td>{company.address}</td>
            <td>{format_timestamp(company.created_at, "-")}</td>
        </tr>
    }
}
