//! Impls: adapters behind the ports.
//!
//! - **HttpWebhooks / HttpArticleStore**: the production side, talking to
//!   the workflow engine's webhooks and the datastore's REST surface.
//! - **InMemoryArticleStore / InMemoryWorkflow**: in-process stand-ins for
//!   tests and the offline demo.

pub mod http_store;
pub mod http_webhook;
pub mod inmem;

pub use self::http_store::HttpArticleStore;
pub use self::http_webhook::HttpWebhooks;
pub use self::inmem::{InMemoryArticleStore, InMemoryWorkflow};

use crate::domain::PipelineError;

/// Transport-level failures all collapse into the "network" bucket; the
/// operator only ever sees the message.
fn into_network_error(error: reqwest::Error) -> PipelineError {
    PipelineError::Network {
        message: error.to_string(),
    }
}
