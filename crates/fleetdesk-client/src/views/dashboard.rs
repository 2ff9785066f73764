use std::time::Duration;

use fleetdesk_types::{CompanyStats, DeviceStats};

use crate::{error_message, AuthClient, ClientResult};

/// How often the dashboard re-issues its stats fetches.
pub const DASHBOARD_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub device_stats: Option<DeviceStats>,
    pub company_stats: Option<CompanyStats>,
    pub error: Option<String>,
}

impl DashboardState {
    /// Keeps the last good numbers when a poll fails, so the cards do not
    /// blank out on a transient error.
    pub fn apply(
        &mut self,
        devices: ClientResult<DeviceStats>,
        companies: ClientResult<CompanyStats>,
    ) {
        let mut error = None;

        match devices {
            Ok(stats) => self.device_stats = Some(stats),
            Err(e) => {
                tracing::warn!("failed to load device stats: {e}");
                error = Some(error_message(&e));
            }
        }

        match companies {
            Ok(stats) => self.company_stats = Some(stats),
            Err(e) => {
                tracing::warn!("failed to load company stats: {e}");
                error = error.or_else(|| Some(error_message(&e)));
            }
        }

        self.error = error;
    }

    pub fn is_loading(&self) -> bool {
        self.device_stats.is_none() && self.company_stats.is_none() && self.error.is_none()
    }

    /// Share of devices currently online, in percent.
    pub fn online_ratio(&self) -> f32 {
        match &self.device_stats {
            Some(stats) if stats.total > 0 => stats.online as f32 / stats.total as f32 * 100.0,
            _ => 0.0,
        }
    }

    pub async fn refresh(&mut self, client: &AuthClient) {
        let (devices, companies) = fetch(client).await;
        self.apply(devices, companies);
    }
}

/// Both dashboard fetches, issued together.
pub async fn fetch(client: &AuthClient) -> (ClientResult<DeviceStats>, ClientResult<CompanyStats>) {
    futures::future::join(client.device_stats(), client.company_stats()).await
}
