use crate::config::Config;
use crate::core::Services;
use crate::errors::{AppError, AppResult};
use std::sync::{Arc, Mutex};

/// Idle service sets kept between requests.
const MAX_IDLE: usize = 8;

/// Shared state of the HTTP server.
///
/// Store and mailer are blocking clients. Each request checks out its own
/// service set on the blocking pool, so a slow backend or mail call only
/// holds up that request. Sets are opened on demand and returned to the
/// idle list afterwards.
pub struct AppState {
    idle: Mutex<Vec<Services>>,
    pub config: Config,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config) -> AppResult<SharedState> {
        let services = Services::open(&config)?;
        Ok(Self::with_services(services, config))
    }

    /// Seed the idle list with `services`; more are opened from `config`
    /// when requests overlap.
    pub fn with_services(services: Services, config: Config) -> SharedState {
        Arc::new(Self {
            idle: Mutex::new(vec![services]),
            config,
        })
    }

    fn checkout(&self) -> AppResult<Services> {
        let pooled = self
            .idle
            .lock()
            .map_err(|_| AppError::Other("service pool poisoned".to_string()))?
            .pop();

        match pooled {
            Some(services) => Ok(services),
            None => Services::open(&self.config),
        }
    }

    fn checkin(&self, services: Services) {
        if let Ok(mut idle) = self.idle.lock()
            && idle.len() < MAX_IDLE
        {
            idle.push(services);
        }
    }

    /// Number of service sets waiting for a request.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }

    /// Run `f` against a checked-out service set on the blocking thread pool.
    pub async fn run<T, F>(self: &Arc<Self>, f: F) -> AppResult<T>
    where
        F: FnOnce(&Services) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let state = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            let services = state.checkout()?;
            let result = f(&services);
            state.checkin(services);
            result
        })
        .await
        .map_err(|e| AppError::Other(format!("request task failed: {e}")))?
    }
}
