//! Correlation identifier for one HTTP request.
//!
//! The [`Trace`](crate::Trace) middleware opens a scope per request; errors
//! built inside it pick the identifier up through [`TraceId::current`].
//! Task-locals do not follow `tokio::spawn` or blocking threads, so work moved
//! elsewhere must be wrapped in [`TraceId::scope`] or [`TraceId::sync_scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header echoing the identifier back to the client.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// Random v4 UUID naming a request in logs, headers and error bodies.
///
/// # Examples
/// ```
/// use expense_backend::TraceId;
///
/// let id: TraceId = "6f1c2e1a-0b4f-4d36-9a55-2c1b1f0e9d11".parse().expect("uuid");
/// assert_eq!(id.to_string(), "6f1c2e1a-0b4f-4d36-9a55-2c1b1f0e9d11");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Identifier of the enclosing request, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    ///
    /// # Examples
    /// ```
    /// use expense_backend::TraceId;
    ///
    /// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
    /// let id: TraceId = "00000000-0000-0000-0000-000000000001".parse().expect("uuid");
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        CURRENT.scope(trace_id, fut).await
    }

    /// Synchronous counterpart of [`TraceId::scope`] for closures handed to
    /// the blocking pool. `None` runs `work` without an identifier.
    pub fn sync_scope<R>(trace_id: Option<Self>, work: impl FnOnce() -> R) -> R {
        match trace_id {
            Some(id) => CURRENT.sync_scope(id, work),
            None => work(),
        }
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
