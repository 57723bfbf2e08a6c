pub mod error;
pub mod gate;
pub mod instance;
pub mod metrics;
pub mod select;
pub mod token;

pub use error::CoreError;
pub use gate::{
    ActionGate, ActionProgress, ActionRunner, ActionStatus, AdminAction, StartOutcome,
    TriggerOutcome,
};
pub use instance::{InstanceDirectory, InstanceHandle, RouterInstance, StaticDirectory};
pub use metrics::{ActionOutcome, ConsoleMetrics, MetricsHandle, NoOpMetrics, noop_metrics};
pub use select::resolve;
pub use token::TokenRotor;

pub mod prelude {
    pub use crate::error::CoreError;
    pub use crate::gate::{ActionGate, AdminAction, TriggerOutcome};
    pub use crate::instance::{InstanceDirectory, InstanceHandle, RouterInstance};
    pub use crate::select::resolve;
}
