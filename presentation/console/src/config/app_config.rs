use business::application::workflow::settings::WorkflowSettings;

use super::{api_config::ApiConfig, workflow_config};

pub struct AppConfig {
    pub api: ApiConfig,
    pub workflow: WorkflowSettings,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            api: ApiConfig::from_env()?,
            workflow: workflow_config::from_env()?,
        })
    }
}
