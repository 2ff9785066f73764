mod common;

use std::sync::{Arc, Mutex};

use common::{harness, tokens, ScriptedTransport};
use fleetdesk_client::views::{
    CrudPage, DashboardState, Devices, Companies, LoginState, ReferenceData, Users,
};
use fleetdesk_client::{ApiResponse, MemorySessionStore, SessionStore, FALLBACK_ERROR_MESSAGE};
use fleetdesk_types::forms::{EntityForm, FormMode};
use fleetdesk_types::DeviceStatus;
use http::{Method, StatusCode};
use serde_json::{json, Value};

fn signed_in() -> MemorySessionStore {
    MemorySessionStore::with_tokens(&tokens("fresh", "r1"))
}

/// In-memory `/devices` collection answering like the real API.
fn device_api(devices: Arc<Mutex<Vec<Value>>>) -> ScriptedTransport {
    ScriptedTransport::new(move |request| {
        let mut rows = devices.lock().unwrap();
        let id = request.path.strip_prefix("/devices/").map(str::to_string);
        let response = match (request.method.clone(), id) {
            (Method::GET, None) => ApiResponse::ok(Value::Array(rows.clone())),
            (Method::DELETE, Some(id)) => {
                rows.retain(|row| row["id"] != id.as_str());
                ApiResponse::ok(json!({ "success": true }))
            }
            (Method::PUT, Some(_)) | (Method::POST, None) => {
                ApiResponse::ok(json!({ "success": true }))
            }
            _ => ApiResponse::new(StatusCode::NOT_FOUND, None),
        };
        Ok(response)
    })
}

#[tokio::test]
async fn device_list_renders_and_confirmed_delete_removes_row() {
    let rows = Arc::new(Mutex::new(vec![json!({
        "id": "1",
        "name": "Boiler probe",
        "type": "sensor",
        "status": "online",
        "push_interval": 60
    })]));
    let h = harness(device_api(rows.clone()), signed_in());

    let mut page = CrudPage::<Devices>::new();
    page.refresh(&h.client).await;

    assert_eq!(page.error, None);
    assert_eq!(page.visible_rows().len(), 1);
    let row = &page.visible_rows()[0];
    assert_eq!(row.status, DeviceStatus::Online);
    assert_eq!(row.status.indicator_color(), "green");

    // Nothing is deleted until the confirmation.
    assert!(page.request_delete("1"));
    page.cancel_delete();
    assert!(!page.confirm_delete(&h.client).await);
    assert_eq!(h.transport.count(Method::DELETE, "/devices/1"), 0);

    assert!(page.request_delete("1"));
    assert!(page.confirm_delete(&h.client).await);

    assert!(page.items.is_empty());
    assert_eq!(h.transport.count(Method::DELETE, "/devices/1"), 1);
    assert_eq!(h.transport.count(Method::GET, "/devices"), 2);
}

#[tokio::test]
async fn unchanged_edit_sends_fetched_fields_back() {
    let rows = Arc::new(Mutex::new(vec![json!({
        "id": "d7",
        "name": "Gate",
        "deviceType": "gateway",
        "status": "maintenance",
        "location": "Dock 4",
        "pushInterval": 300,
        "enabled": false,
        "companyId": "c1"
    })]));
    let h = harness(device_api(rows), signed_in());

    let mut page = CrudPage::<Devices>::new();
    page.refresh(&h.client).await;

    assert!(page.open_edit("d7"));
    assert!(page.submit(&h.client).await);
    assert!(page.modal.is_none());

    let update = h
        .transport
        .calls()
        .into_iter()
        .find(|r| r.method == Method::PUT)
        .unwrap();
    assert_eq!(update.path, "/devices/d7");
    assert_eq!(
        update.body.unwrap(),
        json!({
            "name": "Gate",
            "type": "gateway",
            "status": "maintenance",
            "location": "Dock 4",
            "pushInterval": 300,
            "enabled": false,
            "companyId": "c1"
        })
    );
    // Saved, then refetched.
    assert_eq!(h.transport.count(Method::GET, "/devices"), 2);
}

#[tokio::test]
async fn every_fetched_device_can_be_resubmitted_unchanged() {
    let rows = Arc::new(Mutex::new(vec![
        json!({ "id": "fast", "name": "Fast", "type": "sensor", "pushInterval": 1 }),
        json!({ "id": "slow", "name": "Slow", "type": "sensor", "push_interval": 86_400 }),
        json!({ "id": "default", "name": "Default", "type": "sensor", "status": "online" }),
    ]));
    let h = harness(device_api(rows), signed_in());

    let mut page = CrudPage::<Devices>::new();
    page.refresh(&h.client).await;
    assert_eq!(page.items.len(), 3);

    for id in ["fast", "slow", "default"] {
        assert!(page.open_edit(id));
        assert!(page.submit(&h.client).await, "unchanged edit of {id} was refused");
        assert_eq!(h.transport.count(Method::PUT, &format!("/devices/{id}")), 1);
    }
}

#[tokio::test]
async fn record_the_form_could_not_resubmit_fails_the_list_load() {
    for bad in [
        json!({ "id": "1", "type": "sensor", "status": "online" }),
        json!({ "id": "1", "name": "x", "type": "sensor", "pushInterval": 0 }),
    ] {
        let h = harness(device_api(Arc::new(Mutex::new(vec![bad]))), signed_in());

        let mut page = CrudPage::<Devices>::new();
        page.refresh(&h.client).await;

        assert!(page.items.is_empty());
        assert_eq!(page.error.as_deref(), Some(FALLBACK_ERROR_MESSAGE));
        assert!(!page.open_edit("1"));
        assert_eq!(h.transport.count(Method::PUT, "/devices/1"), 0);
    }
}

#[tokio::test]
async fn fetched_user_with_embedded_role_resubmits_unchanged() {
    let h = harness(
        ScriptedTransport::new(|request| {
            Ok(match request.method {
                Method::GET => ApiResponse::ok(json!([{
                    "_id": "u2",
                    "email": "grace@b.com",
                    "fullName": "Grace",
                    "role": { "id": "r1", "name": "operator" }
                }])),
                _ => ApiResponse::ok(json!({ "success": true })),
            })
        }),
        signed_in(),
    );

    let mut page = CrudPage::<Users>::new();
    page.refresh(&h.client).await;
    assert!(page.open_edit("u2"));
    assert!(page.submit(&h.client).await);

    let update = h
        .transport
        .calls()
        .into_iter()
        .find(|r| r.method == Method::PUT)
        .unwrap();
    let body = update.body.unwrap();
    assert_eq!(body["name"], "Grace");
    assert_eq!(body["role"], "operator");
}

#[tokio::test]
async fn user_edit_with_blank_password_omits_it() {
    let h = harness(
        ScriptedTransport::new(|request| {
            Ok(match request.method {
                Method::GET => ApiResponse::ok(json!({
                    "success": true,
                    "data": [{
                        "id": "u1",
                        "email": "a@b.com",
                        "name": "Ada",
                        "role": "admin",
                        "status": "active"
                    }]
                })),
                _ => ApiResponse::ok(json!({ "success": true })),
            })
        }),
        signed_in(),
    );

    let mut page = CrudPage::<Users>::new();
    page.refresh(&h.client).await;
    assert!(page.open_edit("u1"));
    assert!(page.submit(&h.client).await);

    let update = h
        .transport
        .calls()
        .into_iter()
        .find(|r| r.method == Method::PUT)
        .unwrap();
    let body = update.body.unwrap();
    assert!(body.get("password").is_none());
    assert_eq!(body["email"], "a@b.com");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn invalid_form_makes_no_call() {
    let h = harness(device_api(Arc::new(Mutex::new(Vec::new()))), signed_in());

    let mut page = CrudPage::<Devices>::new();
    page.open_create();
    assert!(!page.submit(&h.client).await);

    let modal = page.modal.as_ref().unwrap();
    assert_eq!(modal.errors.get("name"), Some("Name is required"));
    assert!(!modal.submitting);
    assert!(h.transport.calls().is_empty());
}

#[tokio::test]
async fn create_failure_keeps_dialog_open_with_banner() {
    let h = harness(
        ScriptedTransport::new(|request| {
            Ok(match request.method {
                Method::POST => ApiResponse::new(
                    StatusCode::CONFLICT,
                    Some(json!({ "success": false, "message": "Device name already taken" })),
                ),
                _ => ApiResponse::ok(json!([])),
            })
        }),
        signed_in(),
    );

    let mut page = CrudPage::<Devices>::new();
    page.open_create();
    let form = page.form_mut().unwrap();
    form.name = "probe".into();
    form.device_type = "sensor".into();

    assert!(!page.submit(&h.client).await);

    assert_eq!(page.error.as_deref(), Some("Device name already taken"));
    let modal = page.modal.as_ref().unwrap();
    assert_eq!(modal.mode, FormMode::Create);
    assert!(!modal.submitting);
    assert_eq!(h.transport.count(Method::GET, "/devices"), 0);

    page.dismiss_error();
    assert_eq!(page.error, None);
}

#[tokio::test]
async fn list_failure_sets_fallback_banner() {
    let h = harness(
        ScriptedTransport::new(|_| Ok(ApiResponse::new(StatusCode::BAD_GATEWAY, None))),
        signed_in(),
    );

    let mut page = CrudPage::<Devices>::new();
    page.refresh(&h.client).await;

    assert!(!page.loading);
    assert!(page.items.is_empty());
    assert_eq!(page.error.as_deref(), Some(FALLBACK_ERROR_MESSAGE));
}

#[tokio::test]
async fn companies_are_create_only() {
    let h = harness(
        ScriptedTransport::new(|_| {
            Ok(ApiResponse::ok(json!([{ "id": "c1", "name": "Acme", "status": "active" }])))
        }),
        signed_in(),
    );

    let mut page = CrudPage::<Companies>::new();
    page.refresh(&h.client).await;

    assert_eq!(page.items.len(), 1);
    assert!(!page.open_edit("c1"));
    assert!(!page.request_delete("c1"));
    assert!(page.modal.is_none());
}

#[tokio::test]
async fn pagination_applies_over_full_fetch() {
    let rows: Vec<Value> = (0..25)
        .map(|i| json!({ "id": i.to_string(), "name": format!("Sensor {i}"), "type": "sensor" }))
        .collect();
    let h = harness(device_api(Arc::new(Mutex::new(rows))), signed_in());

    let mut page = CrudPage::<Devices>::new();
    page.refresh(&h.client).await;

    assert_eq!(page.items.len(), 25);
    assert_eq!(page.page_count(), 3);
    page.set_page(2);
    assert_eq!(page.visible_rows().len(), 5);
    assert_eq!(page.visible_rows()[0].id, "20");
    assert_eq!(h.transport.count(Method::GET, "/devices"), 1);
}

#[tokio::test]
async fn dashboard_fetches_both_stats() {
    let h = harness(
        ScriptedTransport::new(|request| {
            Ok(match request.path.as_str() {
                "/devices/stats" => ApiResponse::ok(json!({
                    "success": true,
                    "data": { "total": 4, "online": 3, "offline": 1, "maintenance": 0 }
                })),
                "/companies/stats" => ApiResponse::ok(json!({ "total": 2, "active": 2, "inactive": 0 })),
                _ => ApiResponse::new(StatusCode::NOT_FOUND, None),
            })
        }),
        signed_in(),
    );

    let mut dashboard = DashboardState::default();
    assert!(dashboard.is_loading());
    dashboard.refresh(&h.client).await;

    assert_eq!(dashboard.error, None);
    assert_eq!(dashboard.device_stats.as_ref().unwrap().online, 3);
    assert_eq!(dashboard.company_stats.as_ref().unwrap().active, 2);
    assert_eq!(dashboard.online_ratio(), 75.0);
    assert_eq!(h.transport.calls().len(), 2);
}

#[tokio::test]
async fn dashboard_keeps_last_numbers_on_failed_poll() {
    let failing = Arc::new(Mutex::new(false));
    let toggle = failing.clone();
    let h = harness(
        ScriptedTransport::new(move |request| {
            if *toggle.lock().unwrap() {
                return Ok(ApiResponse::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    Some(json!({ "message": "Stats offline" })),
                ));
            }
            Ok(match request.path.as_str() {
                "/devices/stats" => ApiResponse::ok(json!({ "total": 1, "online": 1 })),
                _ => ApiResponse::ok(json!({ "total": 1, "active": 1 })),
            })
        }),
        signed_in(),
    );

    let mut dashboard = DashboardState::default();
    dashboard.refresh(&h.client).await;
    *failing.lock().unwrap() = true;
    dashboard.refresh(&h.client).await;

    assert_eq!(dashboard.error.as_deref(), Some("Stats offline"));
    assert_eq!(dashboard.device_stats.as_ref().unwrap().total, 1);
}

#[tokio::test]
async fn reference_data_resolves_company_names() {
    let leaves = json!({ "view": true, "create": true, "edit": true, "delete": true });
    let h = harness(
        ScriptedTransport::new(move |request| {
            Ok(match request.path.as_str() {
                "/companies" => ApiResponse::ok(json!([{ "id": "c1", "name": "Acme" }])),
                _ => ApiResponse::ok(json!([{
                    "id": "r1",
                    "name": "admin",
                    "permissions": { "devices": leaves, "companies": leaves, "users": leaves }
                }])),
            })
        }),
        signed_in(),
    );

    let reference = ReferenceData::load_all(&h.client).await.unwrap();

    assert_eq!(reference.company_name(Some("c1")), Some("Acme"));
    assert_eq!(reference.company_name(Some("c2")), None);
    assert_eq!(reference.company_name(None), None);
    assert_eq!(reference.role_names(), vec!["admin"]);
}

#[tokio::test]
async fn login_then_session_is_authenticated() {
    let h = harness(
        ScriptedTransport::new(|_| {
            Ok(ApiResponse::ok(json!({ "accessToken": "acc", "refreshToken": "ref" })))
        }),
        MemorySessionStore::new(),
    );

    let mut login = LoginState::default();
    login.form.email = "a@b.com".into();
    login.form.password = "secret1".into();

    assert!(login.submit(&h.client).await);
    assert_eq!(login.error, None);
    assert!(h.session.is_authenticated());
    assert_eq!(h.session.refresh_token().as_deref(), Some("ref"));
}

#[test]
fn edit_form_prefill_matches_entity() {
    let device = fleetdesk_types::normalize::normalize_device(&json!({
        "id": "1",
        "name": "Boiler",
        "type": "sensor",
        "push_interval": 15
    }))
    .unwrap();
    let form = <Devices as fleetdesk_client::views::Resource>::Form::from_entity(&device);
    assert_eq!(form.push_interval, "15");
    assert_eq!(form.device_type, "sensor");
}
