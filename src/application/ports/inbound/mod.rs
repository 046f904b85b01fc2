//! Inbound ports - Interfaces that the application exposes to the outside world
//!
//! Every command and query is a [`Request`] with exactly one
//! [`RequestHandler`]. Handlers are only ever reached through a
//! [`Pipeline`](crate::application::pipeline::Pipeline), which validates first.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::application::errors::ApplicationResult;

/// A command or query understood by the application
pub trait Request: std::fmt::Debug + Send + Sync + 'static {
    /// What a successful handling produces
    type Response: Send + 'static;
}

/// Executes one kind of request
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    /// Handle an already validated request
    ///
    /// Implementations check `cancel` before any persistence or publishing
    /// step and bail out with `ApplicationError::Cancelled` if it fired.
    async fn handle(&self, request: R, cancel: &CancellationToken) -> ApplicationResult<R::Response>;
}
