use crate::{config::Config, infrastructure::inference::traits::WorkflowClient};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<dyn WorkflowClient>,
    pub config: Config,
}
