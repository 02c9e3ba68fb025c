//! App layer: the request choreography and its status surface.

pub mod pipeline;
pub mod status;

pub use self::pipeline::{BuildError, Pipeline, PipelineBuilder, PublishReport};
pub use self::status::{RequestCounts, RequestStateView, RequestStatus};
