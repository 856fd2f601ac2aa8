//! Asynchronous workflows that keep the item list in sync with the remote
//! endpoint.
//!
//! # Design
//! Every workflow has two halves:
//! - [`Workflow::perform`] is the remote call. It returns the success
//!   command or the error, and touches no state.
//! - [`Workflow::run`] sequences that result into the status protocol:
//!   `loading`, then either the success command and `success`, or
//!   `setError(message)` and `error`.
//!
//! Failures end up in state only; `run` never returns them. Concurrent runs
//! are not coordinated and the last dispatch wins.

use tracing::{debug, warn};

use crate::client::RemoteTodos;
use crate::command::{Command, RequestStatus};
use crate::error::ApiError;
use crate::store::Dispatch;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Workflow {
    /// Create an item on the server and append the returned record.
    Add { title: String },
    /// Fetch the whole collection and replace the local list with it.
    List,
    /// Delete an item on the server, then remove it locally by the same id.
    Delete { id: String },
}

impl Workflow {
    pub fn add(title: impl Into<String>) -> Self {
        Workflow::Add {
            title: title.into(),
        }
    }

    pub fn list() -> Self {
        Workflow::List
    }

    pub fn delete(id: impl Into<String>) -> Self {
        Workflow::Delete { id: id.into() }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Workflow::Add { .. } => "add",
            Workflow::List => "list",
            Workflow::Delete { .. } => "delete",
        }
    }

    /// Perform the remote call and return the command to apply on success.
    pub async fn perform<T>(&self, remote: &RemoteTodos<T>) -> Result<Command, ApiError>
    where
        T: Transport,
    {
        match self {
            Workflow::Add { title } => remote.add(title).await.map(Command::Add),
            Workflow::List => remote.list().await.map(Command::AddAll),
            Workflow::Delete { id } => {
                remote.delete(id).await?;
                Ok(Command::Delete(id.clone()))
            }
        }
    }

    /// Run the workflow, dispatching three commands in order. Returns the
    /// terminal status that was dispatched.
    pub async fn run<T, D>(&self, remote: &RemoteTodos<T>, dispatcher: &mut D) -> RequestStatus
    where
        T: Transport,
        D: Dispatch + ?Sized,
    {
        debug!(workflow = self.name(), "workflow started");
        dispatcher.dispatch(Command::SetRequestStatus(RequestStatus::Loading));
        let status = match self.perform(remote).await {
            Ok(command) => {
                dispatcher.dispatch(command);
                RequestStatus::Success
            }
            Err(err) => {
                warn!(workflow = self.name(), error = %err, "workflow failed");
                dispatcher.dispatch(Command::SetError(err.message()));
                RequestStatus::Error
            }
        };
        dispatcher.dispatch(Command::SetRequestStatus(status));
        status
    }
}
