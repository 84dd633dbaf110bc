pub mod errors;
pub mod request;
pub mod result;

pub use errors::WorkflowError;
pub use request::{DetectionRequest, EmptyImage};
pub use result::WorkflowResult;
