//! Correlation id for one API request.
//!
//! The trace middleware opens a scope per request and [`super::Error`] reads
//! the id when it is built, so a clerk quoting the `traceId` from an error
//! response can be matched to the server log lines of that request.
//! Task-locals do not follow `tokio::spawn` or `spawn_blocking`; re-enter the
//! scope there with [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

tokio::task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying one request in logs and error envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random id for a request that did not bring one.
    #[must_use]
    pub(crate) fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id supplied by a caller in the `trace-id` header.
    ///
    /// Surrounding whitespace is ignored; anything that is not a UUID is
    /// refused so log correlation never carries free text.
    pub(crate) fn from_header(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    /// Id of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current id.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
