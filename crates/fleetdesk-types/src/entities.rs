use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Canonical shapes produced by `normalize`. Absent optional text normalizes to
// an empty string; absent references normalize to `None`.

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub status: CompanyStatus,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub device_type: String,
    pub status: DeviceStatus,
    pub location: String,
    /// Seconds between telemetry pushes.
    pub push_interval: u32,
    pub enabled: bool,
    pub company_id: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub status: UserStatus,
    pub company_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: PermissionMatrix,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Capabilities per resource category. Every leaf is required on the wire:
/// deserializing a matrix with a missing category or capability fails.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionMatrix {
    pub devices: Capabilities,
    pub companies: Capabilities,
    pub users: Capabilities,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Capabilities {
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceCategory {
    Devices,
    Companies,
    Users,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    View,
    Create,
    Edit,
    Delete,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 3] = [
        ResourceCategory::Devices,
        ResourceCategory::Companies,
        ResourceCategory::Users,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceCategory::Devices => "Devices",
            ResourceCategory::Companies => "Companies",
            ResourceCategory::Users => "Users",
        }
    }
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::View,
        Capability::Create,
        Capability::Edit,
        Capability::Delete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Capability::View => "View",
            Capability::Create => "Create",
            Capability::Edit => "Edit",
            Capability::Delete => "Delete",
        }
    }
}

impl Capabilities {
    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::View => self.view,
            Capability::Create => self.create,
            Capability::Edit => self.edit,
            Capability::Delete => self.delete,
        }
    }

    pub fn set(&mut self, capability: Capability, value: bool) {
        match capability {
            Capability::View => self.view = value,
            Capability::Create => self.create = value,
            Capability::Edit => self.edit = value,
            Capability::Delete => self.delete = value,
        }
    }
}

impl PermissionMatrix {
    pub fn category(&self, category: ResourceCategory) -> &Capabilities {
        match category {
            ResourceCategory::Devices => &self.devices,
            ResourceCategory::Companies => &self.companies,
            ResourceCategory::Users => &self.users,
        }
    }

    pub fn category_mut(&mut self, category: ResourceCategory) -> &mut Capabilities {
        match category {
            ResourceCategory::Devices => &mut self.devices,
            ResourceCategory::Companies => &mut self.companies,
            ResourceCategory::Users => &mut self.users,
        }
    }

    pub fn allows(&self, category: ResourceCategory, capability: Capability) -> bool {
        self.category(category).get(capability)
    }

    /// Number of granted capabilities across all categories.
    pub fn granted_count(&self) -> usize {
        ResourceCategory::ALL
            .iter()
            .flat_map(|category| {
                Capability::ALL
                    .iter()
                    .map(move |capability| self.allows(*category, *capability))
            })
            .filter(|granted| *granted)
            .count()
    }
}

/// Wire statuses are open-ended; values this console does not know are kept
/// verbatim so they survive an edit round-trip.
macro_rules! wire_status {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Unknown(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Unknown(raw) => raw.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.to_ascii_lowercase().as_str() {
                    $($wire => $name::$variant,)+
                    _ => $name::Unknown(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $name::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(status: $name) -> Self {
                status.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_status!(DeviceStatus {
    Online => "online",
    Offline => "offline",
    Maintenance => "maintenance",
});

wire_status!(CompanyStatus {
    Active => "active",
    Inactive => "inactive",
});

wire_status!(UserStatus {
    Active => "active",
    Inactive => "inactive",
});

impl DeviceStatus {
    /// Indicator colour for the status dot in device tables.
    pub fn indicator_color(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "green",
            DeviceStatus::Offline => "red",
            DeviceStatus::Maintenance => "amber",
            DeviceStatus::Unknown(_) => "gray",
        }
    }
}

impl Default for DeviceStatus {
    fn default() -> Self {
        DeviceStatus::Offline
    }
}

impl Default for CompanyStatus {
    fn default() -> Self {
        CompanyStatus::Active
    }
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Active
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceStats {
    pub total: u64,
    pub online: u64,
    pub offline: u64,
    pub maintenance: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyStats {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_preserved() {
        let status = DeviceStatus::from("decommissioned");
        assert_eq!(status, DeviceStatus::Unknown("decommissioned".into()));
        assert_eq!(status.as_str(), "decommissioned");
        assert_eq!(status.indicator_color(), "gray");
    }

    #[test]
    fn status_parsing_ignores_case() {
        assert_eq!(DeviceStatus::from("ONLINE"), DeviceStatus::Online);
        assert_eq!(DeviceStatus::Online.indicator_color(), "green");
        assert_eq!(CompanyStatus::from("Inactive"), CompanyStatus::Inactive);
    }

    #[test]
    fn granted_count_walks_all_leaves() {
        let mut matrix = PermissionMatrix::default();
        assert_eq!(matrix.granted_count(), 0);

        matrix.devices.view = true;
        matrix
            .category_mut(ResourceCategory::Users)
            .set(Capability::Delete, true);

        assert_eq!(matrix.granted_count(), 2);
        assert!(matrix.allows(ResourceCategory::Users, Capability::Delete));
        assert!(!matrix.allows(ResourceCategory::Companies, Capability::View));
    }
}
