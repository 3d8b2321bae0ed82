//! Storage diagnostics for `bazaar doctor`.

use serde::Serialize;
use tracing::debug;

use crate::error::AppResult;
use crate::state::Stores;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorReport {
    pub api_url: String,
    /// `"sqlite"` or `"memory"`.
    pub storage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<String>,
    pub healthy: bool,
    pub migrations_total: usize,
    pub migrations_applied: usize,
    pub session_ready: bool,
}

pub async fn doctor(stores: &Stores) -> AppResult<DoctorReport> {
    debug!("doctor command");
    let config = stores.config();
    let session_ready = stores.session()?.is_ready();

    let report = match stores.database() {
        Some(db) => {
            let (migrations_total, migrations_applied) = db.migration_status().await?;
            DoctorReport {
                api_url: config.api_url.clone(),
                storage: "sqlite",
                database_path: config
                    .database_path
                    .as_ref()
                    .map(|p| p.display().to_string()),
                healthy: db.health_check().await,
                migrations_total,
                migrations_applied,
                session_ready,
            }
        }
        None => DoctorReport {
            api_url: config.api_url.clone(),
            storage: "memory",
            database_path: None,
            healthy: true,
            migrations_total: 0,
            migrations_applied: 0,
            session_ready,
        },
    };

    Ok(report)
}
