use fleetdesk_client::views::{CrudPage, Devices, ReferenceData};
use fleetdesk_types::Device;
use leptos::prelude::*;

use super::{company_label, company_options, format_timestamp};
use crate::components::banner::ErrorBanner;
use crate::components::confirm::ConfirmDialog;
use crate::components::field::{CheckboxField, SelectField, TextField};
use crate::components::modal::{Modal, ModalActions};
use crate::components::pager::Pager;
use crate::components::status_dot::StatusDot;
use crate::components::toast::ToastContext;
use crate::state::{
    field_error, form_flag, form_setter, form_toggle, form_value, is_submitting, page_error,
    spawn_delete, spawn_reference, spawn_refresh, spawn_submit, use_client,
};

type DevicesState = RwSignal<CrudPage<Devices>>;

fn status_options() -> Vec<(String, String)> {
    super::options(&[
        ("online", "Online"),
        ("offline", "Offline"),
        ("maintenance", "Maintenance"),
    ])
}

#[component]
pub fn DevicesPage() -> impl IntoView {
    let client = StoredValue::new(use_client());
    let toasts = use_context::<ToastContext>();
    let state: DevicesState = RwSignal::new(CrudPage::new());
    let reference = RwSignal::new(ReferenceData::default());

    #[cfg(feature = "hydrate")]
    {
        spawn_refresh(client.get_value(), state);
        spawn_reference(client.get_value(), reference, false);
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
                <h1>"Devices"</h1>
                <p class="subtitle">"Sensors and gateways reporting to the platform"</p>
            </div>
            <button class="btn btn-primary" on:click=move |_| state.update(|page| page.open_create())>
                "Add device"
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
                        <th>"Type"</th>
                        <th>"Status"</th>
                        <th>"Location"</th>
                        <th>"Company"</th>
                        <th>"Push interval"</th>
                        <th>"Enabled"</th>
                        <th>"Last seen"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let devices = rows.get();
                        if devices.is_empty() {
                            let text = if loading.get() { "Loading devices..." } else { "No devices registered" };
                            return view! {
                                <tr>
                                    <td colspan="9" class="empty-row">{text}</td>
                                </tr>
                            }
                                .into_any();
                        }
                        devices
                            .into_iter()
                            .map(|device| view! { <DeviceRow device=device state=state reference=reference /> })
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
                    let title = if mode.is_edit() { "Edit device" } else { "Add device" };
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
                                    label="Type"
                                    value=form_value(state, |f| f.device_type.clone())
                                    error=field_error(state, "device_type")
                                    on_input=form_setter(state, |f, v| f.device_type = v)
                                />
                                <SelectField
                                    label="Status"
                                    options=status_options()
                                    value=form_value(state, |f| f.status.clone())
                                    error=field_error(state, "status")
                                    on_change=form_setter(state, |f, v| f.status = v)
                                />
                                <TextField
                                    label="Location"
                                    value=form_value(state, |f| f.location.clone())
                                    error=field_error(state, "location")
                                    on_input=form_setter(state, |f, v| f.location = v)
                                />
                                <TextField
                                    label="Push interval (seconds)"
                                    input_type="number"
                                    value=form_value(state, |f| f.push_interval.clone())
                                    error=field_error(state, "push_interval")
                                    on_input=form_setter(state, |f, v| f.push_interval = v)
                                />
                                <SelectField
                                    label="Company"
                                    options=company_options(reference)
                                    placeholder="No company"
                                    value=form_value(state, |f| f.company_id.clone())
                                    error=field_error(state, "company_id")
                                    on_change=form_setter(state, |f, v| f.company_id = v)
                                />
                                <CheckboxField
                                    label="Enabled"
                                    checked=form_flag(state, |f| f.enabled)
                                    on_toggle=form_toggle(state, |f, v| f.enabled = v)
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
                        .with_untracked(|page| page.find(&id).map(|device| device.name.clone()))
                        .unwrap_or(id);
                    view! {
                        <ConfirmDialog
                            message=format!("Delete device \"{name}\"? This cannot be undone.")
                            on_confirm=Callback::new(move |_| spawn_delete(client.get_value(), state, toasts))
                            on_cancel=Callback::new(move |_| state.update(|page| page.cancel_delete()))
                        />
                    }
                })
        }}
    }
}

#[component]
fn DeviceRow(device: Device, state: DevicesState, reference: RwSignal<ReferenceData>) -> impl IntoView {
    let editId = device.id.clone();
    let deleteId = device.id.clone();
    let company = company_label(reference, device.company_id.clone());

    view! {
        <tr>
            <td>{device.name.clone()}</td>
            <td>{device.device_type.clone()}</td>
            <td>
                <StatusDot status=device.status.clone() />
            </td>
            <td>{device.location.clone()}</td>
            <td>{company}</td>
            <td>{format!("{}s", device.push_interval)}</td>
            <td>{if device.enabled { "Yes" } else { "No" }}</td>
            <td>{format_timestamp(device.last_seen, "Never")}</td>
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
