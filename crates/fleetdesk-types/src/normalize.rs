//! One normalization function per entity.
//!
//! The API is inconsistent about key casing: some endpoints answer with
//! `push_interval`/`created_at`, others with `pushInterval`/`createdAt`. Each
//! function below reads every accepted spelling explicitly and produces the
//! canonical shape from `entities`.
//!
//! A record that normalizes cleanly also passes its edit schema: every field
//! the dialog requires is required here too, so an unchanged edit always
//! submits.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::entities::{
    Company, CompanyStats, Device, DeviceStats, PermissionMatrix, Role, User,
};
use crate::validation::{is_email, MAX_PUSH_INTERVAL, MIN_PUSH_INTERVAL};
use crate::NormalizeError;

/// First present, non-null value among `keys`.
fn pick<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|v| !v.is_null())
}

/// Text field; numbers are accepted since several ids are numeric on the wire.
fn text(value: &Value, keys: &[&str]) -> Option<String> {
    match pick(value, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Blank text counts as missing.
fn required_text(
    value: &Value,
    field: &'static str,
    keys: &[&str],
) -> Result<String, NormalizeError> {
    text(value, keys)
        .filter(|s| !s.trim().is_empty())
        .ok_or(NormalizeError::MissingField(field))
}

fn email(value: &Value, field: &'static str, keys: &[&str]) -> Result<String, NormalizeError> {
    let address = optional_text(value, keys);
    if address.trim().is_empty() || is_email(address.trim()) {
        Ok(address)
    } else {
        Err(NormalizeError::InvalidField {
            field,
            reason: format!("{address:?} is not an email address"),
        })
    }
}

fn optional_text(value: &Value, keys: &[&str]) -> String {
    text(value, keys).unwrap_or_default()
}

/// Reference ids: missing and empty both mean "no reference".
fn reference(value: &Value, keys: &[&str]) -> Option<String> {
    let found = pick(value, keys)?;
    let id = if found.is_object() {
        text(found, &["id", "_id"])
    } else {
        text(value, keys)
    };
    id.filter(|id| !id.is_empty())
}

fn timestamp(value: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    let raw = pick(value, keys)?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn id(value: &Value) -> Result<String, NormalizeError> {
    required_text(value, "id", &["id", "_id"])
}

fn count(value: &Value, keys: &[&str]) -> u64 {
    match pick(value, keys) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

fn ensure_object(value: &Value) -> Result<(), NormalizeError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(NormalizeError::NotAnObject)
    }
}

pub fn normalize_company(value: &Value) -> Result<Company, NormalizeError> {
    ensure_object(value)?;
    Ok(Company {
        id: id(value)?,
        name: required_text(value, "name", &["name"])?,
        status: optional_text(value, &["status"]).into(),
        contact_email: email(value, "contact_email", &["contactEmail", "contact_email", "email"])?,
        contact_phone: optional_text(value, &["contactPhone", "contact_phone", "phone"]),
        address: optional_text(value, &["address"]),
        created_at: timestamp(value, &["createdAt", "created_at"]),
        updated_at: timestamp(value, &["updatedAt", "updated_at"]),
    })
}

/// Push interval in seconds. Missing means the server default of 60.
fn push_interval(value: &Value) -> Result<u32, NormalizeError> {
    let field = "push_interval";
    let seconds = match pick(value, &["pushInterval", "push_interval"]) {
        None => return Ok(60),
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| NormalizeError::InvalidField {
            field,
            reason: format!("{n} is not a valid interval"),
        })?,
        Some(Value::String(s)) => s.trim().parse().map_err(|_| NormalizeError::InvalidField {
            field,
            reason: format!("{s:?} is not a number"),
        })?,
        Some(other) => {
            return Err(NormalizeError::InvalidField {
                field,
                reason: format!("unexpected {other}"),
            })
        }
    };

    u32::try_from(seconds)
        .ok()
        .filter(|s| (MIN_PUSH_INTERVAL..=MAX_PUSH_INTERVAL).contains(s))
        .ok_or_else(|| NormalizeError::InvalidField {
            field,
            reason: format!(
                "{seconds} is outside {MIN_PUSH_INTERVAL}..={MAX_PUSH_INTERVAL} seconds"
            ),
        })
}

/// Devices are enabled unless the server says otherwise.
fn enabled(value: &Value) -> bool {
    match pick(value, &["enabled", "isEnabled", "is_enabled"]) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s != "false",
        Some(Value::Number(n)) => n.as_i64() != Some(0),
        _ => true,
    }
}

pub fn normalize_device(value: &Value) -> Result<Device, NormalizeError> {
    ensure_object(value)?;
    Ok(Device {
        id: id(value)?,
        name: required_text(value, "name", &["name"])?,
        device_type: required_text(value, "type", &["type", "deviceType", "device_type"])?,
        status: optional_text(value, &["status"]).into(),
        location: optional_text(value, &["location"]),
        push_interval: push_interval(value)?,
        enabled: enabled(value),
        company_id: reference(value, &["companyId", "company_id", "company"]),
        last_seen: timestamp(value, &["lastSeen", "last_seen"]),
        created_at: timestamp(value, &["createdAt", "created_at"]),
        updated_at: timestamp(value, &["updatedAt", "updated_at"]),
    })
}

/// The role may arrive as a plain name or as an embedded role object.
fn role_name(value: &Value) -> Result<String, NormalizeError> {
    match pick(value, &["role", "roleName", "role_name"]) {
        Some(role @ Value::Object(_)) => required_text(role, "role", &["name"]),
        _ => required_text(value, "role", &["role", "roleName", "role_name"]),
    }
}

pub fn normalize_user(value: &Value) -> Result<User, NormalizeError> {
    ensure_object(value)?;
    Ok(User {
        id: id(value)?,
        email: required_text(value, "email", &["email"])
            .and_then(|_| email(value, "email", &["email"]))?,
        name: required_text(value, "name", &["name", "fullName", "full_name"])?,
        role: role_name(value)?,
        status: optional_text(value, &["status"]).into(),
        company_id: reference(value, &["companyId", "company_id", "company"]),
        created_at: timestamp(value, &["createdAt", "created_at"]),
        updated_at: timestamp(value, &["updatedAt", "updated_at"]),
    })
}

/// Permission matrices must carry all nine leaves; nothing is defaulted.
pub fn normalize_permissions(value: &Value) -> Result<PermissionMatrix, NormalizeError> {
    serde_json::from_value(value.clone())
        .map_err(|e| NormalizeError::IncompletePermissions(e.to_string()))
}

pub fn normalize_role(value: &Value) -> Result<Role, NormalizeError> {
    ensure_object(value)?;
    let permissions = pick(value, &["permissions"])
        .ok_or(NormalizeError::MissingField("permissions"))?;

    Ok(Role {
        id: id(value)?,
        name: required_text(value, "name", &["name"])?,
        description: optional_text(value, &["description"]),
        permissions: normalize_permissions(permissions)?,
        created_at: timestamp(value, &["createdAt", "created_at"]),
        updated_at: timestamp(value, &["updatedAt", "updated_at"]),
    })
}

pub fn normalize_device_stats(value: &Value) -> Result<DeviceStats, NormalizeError> {
    ensure_object(value)?;
    Ok(DeviceStats {
        total: count(value, &["total", "totalDevices", "total_devices"]),
        online: count(value, &["online", "onlineDevices", "online_devices"]),
        offline: count(value, &["offline", "offlineDevices", "offline_devices"]),
        maintenance: count(value, &["maintenance", "maintenanceDevices", "maintenance_devices"]),
    })
}

pub fn normalize_company_stats(value: &Value) -> Result<CompanyStats, NormalizeError> {
    ensure_object(value)?;
    Ok(CompanyStats {
        total: count(value, &["total", "totalCompanies", "total_companies"]),
        active: count(value, &["active", "activeCompanies", "active_companies"]),
        inactive: count(value, &["inactive", "inactiveCompanies", "inactive_companies"]),
    })
}
