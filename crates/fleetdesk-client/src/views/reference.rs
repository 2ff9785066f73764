use fleetdesk_types::{Company, Role};

use crate::{AuthClient, ClientResult};

/// Lookup collections the device and user forms offer as choices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceData {
    pub companies: Vec<Company>,
    pub roles: Vec<Role>,
}

impl ReferenceData {
    pub async fn load_companies(client: &AuthClient) -> ClientResult<Self> {
        Ok(Self {
            companies: client.list_companies().await?,
            roles: Vec::new(),
        })
    }

    /// Companies and roles, fetched together.
    pub async fn load_all(client: &AuthClient) -> ClientResult<Self> {
        let (companies, roles) =
            futures::future::join(client.list_companies(), client.list_roles()).await;
        Ok(Self {
            companies: companies?,
            roles: roles?,
        })
    }

    pub fn company_name(&self, id: Option<&str>) -> Option<&str> {
        let id = id?;
        self.companies
            .iter()
            .find(|company| company.id == id)
            .map(|company| company.name.as_str())
    }

    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(|role| role.name.as_str()).collect()
    }
}
