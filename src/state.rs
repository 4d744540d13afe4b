use std::sync::Arc;

use crate::{
    backend::{Api, Backend, SharedBackend},
    middleware::auth::Session,
};

#[derive(Clone)]
pub struct AppState {
    pub backend: SharedBackend,
}

impl AppState {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Backend access on behalf of one caller.
    pub fn api<'a>(&'a self, session: &'a Session) -> Api<'a> {
        Api::new(self.backend.as_ref(), session)
    }
}
