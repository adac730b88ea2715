//! Liveness and readiness probes.
//!
//! Readiness flips on once startup finishes and, when a [`ReadinessCheck`]
//! is attached, also requires the dependency it guards to answer. Liveness
//! only drops when the process is draining.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use async_trait::async_trait;
use tracing::warn;

/// Dependency probed on every readiness request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    /// `Err` carries a short reason for the logs.
    async fn check(&self) -> Result<(), String>;
}

/// Shared probe state.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    dependency: Option<Arc<dyn ReadinessCheck>>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            dependency: None,
        }
    }
}

impl HealthState {
    /// Not ready, alive, with no dependency check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also require `check` to pass before reporting ready.
    #[must_use]
    pub fn with_dependency(mut self, check: Arc<dyn ReadinessCheck>) -> Self {
        self.dependency = Some(check);
        self
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    async fn dependency_ok(&self) -> bool {
        let Some(check) = &self.dependency else {
            return true;
        };
        match check.check().await {
            Ok(()) => true,
            Err(reason) => {
                warn!(%reason, "readiness dependency check failed");
                false
            }
        }
    }
}

fn probe_response(ok: bool) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe: 200 once started and the database answers, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is starting or the database is unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready() && state.dependency_ok().await)
}

/// Liveness probe: 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}
