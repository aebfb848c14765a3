use std::sync::Arc;

use shared::Product;

use crate::db::store::ProductStore;
use crate::form::{FormController, FormInput};
use crate::services::notification::Notifier;
use crate::sync::SyncMirror;

/// Application state — the single coordinating instance
///
/// Owns the sync mirror, the form controller, and the notifier. The store is
/// injected once at construction and shared with the controller; nothing here
/// reaches for ambient singletons. Constructed at startup, torn down never.
pub struct AppState {
    pub mirror: SyncMirror,
    pub controller: FormController,
    pub notices: Notifier,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            mirror: SyncMirror::new(),
            controller: FormController::new(store),
            notices: Notifier::default(),
        }
    }

    /// Submit the form. Returns the candidate record that was written.
    pub async fn submit(&mut self, input: &FormInput) -> Product {
        self.controller
            .submit(input, &mut self.mirror, &mut self.notices)
            .await
    }

    /// Delete a record. The caller has already confirmed interactively.
    pub async fn delete(&mut self, id: &str) {
        self.controller
            .delete(id, &mut self.mirror, &mut self.notices)
            .await;
    }

    /// Switch the form into edit mode for `id`; `None` when the record is
    /// not in the mirror.
    pub fn begin_edit(&mut self, id: &str) -> Option<FormInput> {
        self.controller.begin_edit(id, &self.mirror)
    }
}
