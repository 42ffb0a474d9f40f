//! Navigation side effects requested by the client.

/// Receives the client's navigation requests. The only one issued today is
/// the move to the login route after a 401.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator for embedders without routes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, path: &str) {
        log::debug!("Navigation to {} ignored", path);
    }
}
