/// Data Transfer Objects for application layer
///
/// DTOs carry requests and results between the CLI adapter and the
/// explore use case, keeping the explorer core isolated.
mod explore_request;
mod explore_response;
mod output_format;

pub use explore_request::{ExploreRequest, OverrideSpec, MAX_DEPTH};
pub use explore_response::ExploreResponse;
pub use output_format::OutputFormat;
