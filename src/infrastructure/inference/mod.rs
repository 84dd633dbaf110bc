pub mod roboflow_client;
pub mod staging;
pub mod traits;

pub use roboflow_client::RoboflowClient;
pub use traits::WorkflowClient;
