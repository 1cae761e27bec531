// ABOUTME: Deployment orchestration using the type state pattern.
// ABOUTME: Exports state types, the mutator, the poller and the pipeline driver.

mod deployment;
mod driver;
mod error;
mod mutate;
mod poll;
mod state;
mod summary;
mod transitions;

pub use deployment::Deployment;
pub use driver::deploy;
pub use error::{DeployError, DeployErrorKind};
pub use mutate::mutate;
pub use poll::{PollReport, await_convergence};
pub use state::{
    Completed, DefinitionLoaded, Initialized, Prepared, Registered, ServiceResolved,
    ServiceUpdated,
};
pub use summary::{Convergence, Summary};
