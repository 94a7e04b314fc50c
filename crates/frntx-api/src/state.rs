use std::sync::Arc;

use frntx_assistants::AssistantsApi;
use frntx_chat::RunCoordinator;
use frntx_persist::MirrorStore;
use frntx_storage::ObjectStore;

use crate::config::Config;

/// Shared application state passed to all handlers.
///
/// All resources are wrapped in Arc for efficient sharing across async tasks.
pub struct AppState {
    pub config: Arc<Config>,
    pub assistants: Arc<dyn AssistantsApi>,
    pub coordinator: RunCoordinator,
    pub mirror: Arc<dyn MirrorStore>,
    pub objects: Arc<dyn ObjectStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        assistants: Arc<dyn AssistantsApi>,
        coordinator: RunCoordinator,
        mirror: Arc<dyn MirrorStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            assistants,
            coordinator,
            mirror,
            objects,
        }
    }
}
