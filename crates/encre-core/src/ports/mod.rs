//! Ports: trait seams for everything outside the process.
//!
//! Each trait hides one external system behind an interface:
//! - the workflow engine's webhooks (generation trigger, publication),
//! - the article datastore (lookup by keyword, listing),
//! - time (now + the fixed-delay wait),
//! - id generation.
//!
//! The HTTP adapters in `impls` are the production side; the in-memory ones
//! drive tests and the offline demo.

pub mod article_store;
pub mod clock;
pub mod id_generator;
pub mod webhooks;

pub use self::article_store::ArticleStore;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::webhooks::{GenerationWebhook, PublishReceipt, PublishWebhook};
