//! Typed endpoints. Lists tolerate both envelopes and come back normalized.

use fleetdesk_types::envelope::{normalize_list, unwrap_object};
use fleetdesk_types::forms::{CompanyPayload, DevicePayload, RolePayload, UserPayload};
use fleetdesk_types::normalize::{
    normalize_company, normalize_company_stats, normalize_device, normalize_device_stats,
    normalize_role, normalize_user,
};
use fleetdesk_types::{Company, CompanyStats, Device, DeviceStats, Role, User};

use crate::{AuthClient, ClientResult};

impl AuthClient {
    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        let body = self.get_json("/users").await?;
        Ok(normalize_list(body, normalize_user)?)
    }

    pub async fn create_user(&self, payload: &UserPayload) -> ClientResult<()> {
        self.post_json("/users", payload).await?;
        Ok(())
    }

    pub async fn update_user(&self, id: &str, payload: &UserPayload) -> ClientResult<()> {
        self.put_json(&format!("/users/{id}"), payload).await?;
        Ok(())
    }

    pub async fn delete_user(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/users/{id}")).await?;
        Ok(())
    }

    pub async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        let body = self.get_json("/roles").await?;
        Ok(normalize_list(body, normalize_role)?)
    }

    pub async fn create_role(&self, payload: &RolePayload) -> ClientResult<()> {
        self.post_json("/roles", payload).await?;
        Ok(())
    }

    pub async fn update_role(&self, id: &str, payload: &RolePayload) -> ClientResult<()> {
        self.put_json(&format!("/roles/{id}"), payload).await?;
        Ok(())
    }

    pub async fn delete_role(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/roles/{id}")).await?;
        Ok(())
    }

    pub async fn list_companies(&self) -> ClientResult<Vec<Company>> {
        let body = self.get_json("/companies").await?;
        Ok(normalize_list(body, normalize_company)?)
    }

    pub async fn create_company(&self, payload: &CompanyPayload) -> ClientResult<()> {
        self.post_json("/companies", payload).await?;
        Ok(())
    }

    pub async fn company_stats(&self) -> ClientResult<CompanyStats> {
        let body = self.get_json("/companies/stats").await?;
        Ok(normalize_company_stats(&unwrap_object(body)?)?)
    }

    pub async fn list_devices(&self) -> ClientResult<Vec<Device>> {
        let body = self.get_json("/devices").await?;
        Ok(normalize_list(body, normalize_device)?)
    }

    pub async fn create_device(&self, payload: &DevicePayload) -> ClientResult<()> {
        self.post_json("/devices", payload).await?;
        Ok(())
    }

    pub async fn update_device(&self, id: &str, payload: &DevicePayload) -> ClientResult<()> {
        self.put_json(&format!("/devices/{id}"), payload).await?;
        Ok(())
    }

    pub async fn delete_device(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/devices/{id}")).await?;
        Ok(())
    }

    pub async fn device_stats(&self) -> ClientResult<DeviceStats> {
        let body = self.get_json("/devices/stats").await?;
        Ok(normalize_device_stats(&unwrap_object(body)?)?)
    }
}
