pub mod companies;
pub mod dashboard;
pub mod devices;
pub mod login;
pub mod roles;
pub mod users;

use chrono::{DateTime, Utc};
use fleetdesk_client::views::ReferenceData;
use leptos::prelude::*;

fn options(values: &[(&str, &str)]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect()
}

pub(crate) fn activity_options() -> Vec<(String, String)> {
    options(&[("active", "Active"), ("inactive", "Inactive")])
}

pub(crate) fn company_options(reference: RwSignal<ReferenceData>) -> Signal<Vec<(String, String)>> {
    Signal::derive(move || {
        reference.with(|data| {
            data.companies
                .iter()
                .map(|company| (company.id.clone(), company.name.clone()))
                .collect()
        })
    })
}

pub(crate) fn company_label(
    reference: RwSignal<ReferenceData>,
    companyId: Option<String>,
) -> impl Fn() -> String + Send + Sync + 'static {
    move || {
        reference.with(|data| {
            data.company_name(companyId.as_deref())
                .unwrap_or("-")
                .to_string()
        })
    }
}

pub(crate) fn format_timestamp(at: Option<DateTime<Utc>>, missing: &str) -> String {
    at.map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| missing.to_string())
}
