use serde::{Deserialize, Serialize};

use crate::entities::{
    Company, CompanyStatus, Device, DeviceStatus, PermissionMatrix, Role, User, UserStatus,
};
use crate::validation::{self, FieldErrors, Schema};

pub const DEFAULT_PUSH_INTERVAL: u32 = 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit { .. })
    }
}

/// Modal form state for one entity type. `Default` is the empty create form.
pub trait EntityForm: Clone + Default + Send + Sync + 'static {
    type Entity: Clone + Send + Sync + 'static;
    type Payload: Serialize + Send + Sync + 'static;

    fn from_entity(entity: &Self::Entity) -> Self;

    fn schema(mode: &FormMode) -> Schema;

    /// Text value of a schema field.
    fn field(&self, name: &str) -> Option<&str>;

    /// Wire payload. Only meaningful once `validate` has passed.
    fn payload(&self, mode: &FormMode) -> Self::Payload;

    fn validate(&self, mode: &FormMode) -> Result<(), FieldErrors> {
        validation::validate(Self::schema(mode), |name| self.field(name)).into_result()
    }

    fn submission(&self, mode: &FormMode) -> Result<Self::Payload, FieldErrors> {
        self.validate(mode)?;
        Ok(self.payload(mode))
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserForm {
    pub email: String,
    pub name: String,
    pub role: String,
    pub status: String,
    pub company_id: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub email: String,
    pub name: String,
    pub role: String,
    pub status: UserStatus,
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            name: String::new(),
            role: String::new(),
            status: UserStatus::Active.to_string(),
            company_id: String::new(),
            password: String::new(),
        }
    }
}

impl EntityForm for UserForm {
    type Entity = User;
    type Payload = UserPayload;

    fn from_entity(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            status: user.status.to_string(),
            company_id: user.company_id.clone().unwrap_or_default(),
            password: String::new(),
        }
    }

    fn schema(mode: &FormMode) -> Schema {
        match mode {
            FormMode::Create => validation::USER_CREATE_SCHEMA,
            FormMode::Edit { .. } => validation::USER_UPDATE_SCHEMA,
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "email" => Some(&self.email),
            "name" => Some(&self.name),
            "role" => Some(&self.role),
            "status" => Some(&self.status),
            "company_id" => Some(&self.company_id),
            "password" => Some(&self.password),
            _ => None,
        }
    }

    fn payload(&self, mode: &FormMode) -> UserPayload {
        // Updates leave the stored password alone unless a new one was typed.
        let password = match mode {
            FormMode::Create => Some(self.password.clone()),
            FormMode::Edit { .. } => non_empty(&self.password).map(|_| self.password.clone()),
        };

        UserPayload {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            role: self.role.clone(),
            status: UserStatus::from(self.status.as_str()),
            company_id: non_empty(&self.company_id),
            password,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleForm {
    pub name: String,
    pub description: String,
    pub permissions: PermissionMatrix,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RolePayload {
    pub name: String,
    pub description: String,
    pub permissions: PermissionMatrix,
}

impl EntityForm for RoleForm {
    type Entity = Role;
    type Payload = RolePayload;

    fn from_entity(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            description: role.description.clone(),
            permissions: role.permissions,
        }
    }

    fn schema(_mode: &FormMode) -> Schema {
        validation::ROLE_SCHEMA
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            _ => None,
        }
    }

    fn payload(&self, _mode: &FormMode) -> RolePayload {
        RolePayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            permissions: self.permissions,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanyForm {
    pub name: String,
    pub status: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPayload {
    pub name: String,
    pub status: CompanyStatus,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
}

impl Default for CompanyForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            status: CompanyStatus::Active.to_string(),
            contact_email: String::new(),
            contact_phone: String::new(),
            address: String::new(),
        }
    }
}

impl EntityForm for CompanyForm {
    type Entity = Company;
    type Payload = CompanyPayload;

    fn from_entity(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            status: company.status.to_string(),
            contact_email: company.contact_email.clone(),
            contact_phone: company.contact_phone.clone(),
            address: company.address.clone(),
        }
    }

    fn schema(_mode: &FormMode) -> Schema {
        validation::COMPANY_SCHEMA
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "status" => Some(&self.status),
            "contact_email" => Some(&self.contact_email),
            "contact_phone" => Some(&self.contact_phone),
            "address" => Some(&self.address),
            _ => None,
        }
    }

    fn payload(&self, _mode: &FormMode) -> CompanyPayload {
        CompanyPayload {
            name: self.name.trim().to_string(),
            status: CompanyStatus::from(self.status.as_str()),
            contact_email: self.contact_email.trim().to_string(),
            contact_phone: self.contact_phone.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceForm {
    pub name: String,
    pub device_type: String,
    pub status: String,
    pub location: String,
    pub push_interval: String,
    pub enabled: bool,
    pub company_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DevicePayload {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub status: DeviceStatus,
    pub location: String,
    pub push_interval: u32,
    pub enabled: bool,
    pub company_id: Option<String>,
}

impl Default for DeviceForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            device_type: String::new(),
            status: DeviceStatus::Offline.to_string(),
            location: String::new(),
            push_interval: DEFAULT_PUSH_INTERVAL.to_string(),
            enabled: true,
            company_id: String::new(),
        }
    }
}

impl EntityForm for DeviceForm {
    type Entity = Device;
    type Payload = DevicePayload;

    fn from_entity(device: &Device) -> Self {
        Self {
            name: device.name.clone(),
            device_type: device.device_type.clone(),
            status: device.status.to_string(),
            location: device.location.clone(),
            push_interval: device.push_interval.to_string(),
            enabled: device.enabled,
            company_id: device.company_id.clone().unwrap_or_default(),
        }
    }

    fn schema(_mode: &FormMode) -> Schema {
        validation::DEVICE_SCHEMA
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "device_type" => Some(&self.device_type),
            "status" => Some(&self.status),
            "location" => Some(&self.location),
            "push_interval" => Some(&self.push_interval),
            "company_id" => Some(&self.company_id),
            _ => None,
        }
    }

    fn payload(&self, _mode: &FormMode) -> DevicePayload {
        DevicePayload {
            name: self.name.trim().to_string(),
            device_type: self.device_type.trim().to_string(),
            status: DeviceStatus::from(self.status.as_str()),
            location: self.location.trim().to_string(),
            push_interval: self
                .push_interval
                .trim()
                .parse()
                .unwrap_or(DEFAULT_PUSH_INTERVAL),
            enabled: self.enabled,
            company_id: non_empty(&self.company_id),
        }
    }
}
