//! Per-page state containers.
//!
//! A page owns one [`Loadable`] per backend resource it shows. Loading is
//! never optimistic: after a mutation the data is fetched again.

mod dashboard;

use std::future::Future;

use crate::error::ApiResult;

pub use dashboard::Dashboard;

/// Data fetched from the backend, with its loading flag and last error.
#[derive(Debug, Clone)]
pub struct Loadable<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> Loadable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Await `fetch` and store its outcome. On failure the previous data
    /// stays in place next to the error message.
    pub async fn load<F>(&mut self, fetch: F) -> &mut Self
    where
        F: Future<Output = ApiResult<T>>,
    {
        self.loading = true;
        self.error = None;
        match fetch.await {
            Ok(data) => self.data = Some(data),
            Err(e) => self.error = Some(e.message),
        }
        self.loading = false;
        self
    }

    /// Run `mutation`, then `refresh` only if it succeeded.
    ///
    /// The mutation's outcome is returned as well as recorded, so a caller
    /// can tell a rejected change from a failed reload.
    pub async fn mutate_then_refresh<U, M, R>(&mut self, mutation: M, refresh: R) -> ApiResult<U>
    where
        M: Future<Output = ApiResult<U>>,
        R: Future<Output = ApiResult<T>>,
    {
        self.loading = true;
        self.error = None;
        match mutation.await {
            Ok(outcome) => {
                self.load(refresh).await;
                Ok(outcome)
            }
            Err(e) => {
                self.error = Some(e.message.clone());
                self.loading = false;
                Err(e)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
