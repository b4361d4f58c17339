use std::sync::Arc;

use logger::TracingLogger;
use rest_client::client::ApiClient;
use rest_client::product_repository::ProductRepositoryHttp;

use business::application::notification::channel::NotificationChannel;
use business::application::product::delete::DeleteProductUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::workflow::search::SearchWorkflow;
use business::domain::session::state::SharedState;

use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub state: Arc<SharedState>,
    pub search: Arc<SearchWorkflow>,
}

impl DependencyContainer {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let use_case_logger = Arc::new(TracingLogger::new("use_case"));
        let workflow_logger = Arc::new(TracingLogger::new("workflow"));

        // Infrastructure adapters
        let api_client = ApiClient::new(&config.api.base_url, config.api.timeout)?;
        let product_repository = Arc::new(ProductRepositoryHttp::new(api_client));

        // Product use cases
        let get_by_id_use_case = Arc::new(GetProductByIdUseCaseImpl {
            repository: product_repository.clone(),
            logger: use_case_logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteProductUseCaseImpl {
            repository: product_repository,
            logger: use_case_logger,
        });

        // Session
        let state = Arc::new(SharedState::new());
        let notifications = Arc::new(NotificationChannel::new(state.clone()));
        let search = Arc::new(SearchWorkflow::new(
            state.clone(),
            notifications,
            get_by_id_use_case,
            delete_use_case,
            workflow_logger,
            config.workflow,
        ));

        Ok(Self { state, search })
    }
}
