use async_trait::async_trait;
use fleetdesk_types::forms::{CompanyForm, DeviceForm, EntityForm, RoleForm, UserForm};
use fleetdesk_types::{Company, Device, Role, User};

use crate::{AuthClient, ClientError, ClientResult};

pub type PayloadOf<R> = <<R as Resource>::Form as EntityForm>::Payload;

/// One CRUD-managed collection and the endpoints behind it.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Resource: Clone + std::fmt::Debug + Default + Send + Sync + 'static {
    type Entity: Clone + std::fmt::Debug + PartialEq + Send + Sync + 'static;
    type Form: EntityForm<Entity = Self::Entity> + std::fmt::Debug;

    /// Singular label, e.g. "device".
    const NAME: &'static str;
    const SUPPORTS_EDIT: bool = true;
    const SUPPORTS_DELETE: bool = true;

    fn id(entity: &Self::Entity) -> &str;

    async fn list(client: &AuthClient) -> ClientResult<Vec<Self::Entity>>;
    async fn create(client: &AuthClient, payload: &PayloadOf<Self>) -> ClientResult<()>;
    async fn update(client: &AuthClient, id: &str, payload: &PayloadOf<Self>) -> ClientResult<()>;
    async fn delete(client: &AuthClient, id: &str) -> ClientResult<()>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Users;

#[derive(Clone, Copy, Debug, Default)]
pub struct Roles;

#[derive(Clone, Copy, Debug, Default)]
pub struct Companies;

#[derive(Clone, Copy, Debug, Default)]
pub struct Devices;

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Resource for Users {
    type Entity = User;
    type Form = UserForm;
    const NAME: &'static str = "user";

    fn id(user: &User) -> &str {
        &user.id
    }

    async fn list(client: &AuthClient) -> ClientResult<Vec<User>> {
        client.list_users().await
    }

    async fn create(client: &AuthClient, payload: &PayloadOf<Self>) -> ClientResult<()> {
        client.create_user(payload).await
    }

    async fn update(client: &AuthClient, id: &str, payload: &PayloadOf<Self>) -> ClientResult<()> {
        client.update_user(id, payload).await
    }

    async fn delete(client: &AuthClient, id: &str) -> ClientResult<()> {
        client.delete_user(id).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Resource for Roles {
    type Entity = Role;
    type Form = RoleForm;
    const NAME: &'static str = "role";

    fn id(role: &Role) -> &str {
        &role.id
    }

    async fn list(client: &AuthClient) -> ClientResult<Vec<Role>> {
        client.list_roles().await
    }

    async fn create(client: &AuthClient, payload: &PayloadOf<Self>) -> ClientResult<()> {
        client.create_role(payload).await
    }

    async fn update(client: &AuthClient, id: &str, payload: &PayloadOf<Self>) -> ClientResult<()> {
        client.update_role(id, payload).await
    }

    async fn delete(client: &AuthClient, id: &str) -> ClientResult<()> {
        client.delete_role(id).await
    }
}

/// The API only lists and creates companies.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Resource for Companies {
    type Entity = Company;
    type Form = CompanyForm;
    const NAME: &'static str = "company";
    const SUPPORTS_EDIT: bool = false;
    const SUPPORTS_DELETE: bool = false;

    fn id(company: &Company) -> &str {
        &company.id
    }

    async fn list(client: &AuthClient) -> ClientResult<Vec<Company>> {
        client.list_companies().await
    }

    async fn create(client: &AuthClient, payload: &PayloadOf<Self>) -> ClientResult<()> {
        client.create_company(payload).await
    }

    async fn update(_client: &AuthClient, _id: &str, _payload: &PayloadOf<Self>) -> ClientResult<()> {
        Err(ClientError::Unsupported("company update"))
    }

    async fn delete(_client: &AuthClient, _id: &str) -> ClientResult<()> {
        Err(ClientError::Unsupported("company delete"))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Resource for Devices {
    type Entity = Device;
    type Form = DeviceForm;
    const NAME: &'static str = "device";

    fn id(device: &Device) -> &str {
        &device.id
    }

    async fn list(client: &AuthClient) -> ClientResult<Vec<Device>> {
        client.list_devices().await
    }

    async fn create(client: &AuthClient, payload: &PayloadOf<Self>) -> ClientResult<()> {
        client.create_device(payload).await
    }

    async fn update(client: &AuthClient, id: &str, payload: &PayloadOf<Self>) -> ClientResult<()> {
        client.update_device(id, payload).await
    }

    async fn delete(client: &AuthClient, id: &str) -> ClientResult<()> {
        client.delete_device(id).await
    }
}
