//! # tb-api
//!
//! JSON REST surface over the task board API.
//!
//! Every route maps to one [`tb_services::TaskBoardApi`] operation. Request
//! bodies are decoded through the schema layer, so malformed input comes
//! back as a 422 with field messages, the same as a failed contract.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
