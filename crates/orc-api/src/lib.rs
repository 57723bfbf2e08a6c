//! HTTP surface of the orc admin console.
//!
//! [`ConsoleHandler`] abstracts page assembly from serving; [`ConsoleCore`]
//! is the ready-to-use implementation over an instance directory and an
//! action gate; [`HttpConsole`] mounts any handler on an axum router.

mod adapter;
mod error;
mod handler;
mod http;

pub use adapter::ConsoleCore;
pub use error::ApiError;
pub use handler::{ConsoleHandler, GraphView, HomeView, SummarySection, SummaryView};
pub use http::{HttpConsole, serve};
