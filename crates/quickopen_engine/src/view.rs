use std::sync::Arc;

use quickopen_core::AppViewModel;

use crate::{ActivationRegistry, ViewSink};

/// Projects the view model into the host widget and command registry.
pub struct ViewAdapter {
    view: Box<dyn ViewSink>,
    registry: Box<dyn ActivationRegistry>,
    on_select: Arc<dyn Fn(String) + Send + Sync>,
}

impl ViewAdapter {
    /// `on_select` receives the activation id of a selected entry.
    pub fn new(
        view: Box<dyn ViewSink>,
        registry: Box<dyn ActivationRegistry>,
        on_select: Arc<dyn Fn(String) + Send + Sync>,
    ) -> Self {
        Self {
            view,
            registry,
            on_select,
        }
    }

    /// Replaces the widget content with `view.entries`.
    ///
    /// Ids already known to the registry are not registered again. Returns
    /// the number of newly registered ids.
    pub fn render(&mut self, view: &AppViewModel) -> usize {
        self.view.clear();
        let mut registered = 0;
        for entry in &view.entries {
            let id = self.view.add_entry(&entry.category, &entry.label);
            if self.registry.has_command(&id) {
                continue;
            }
            let on_select = self.on_select.clone();
            let target = id.clone();
            self.registry
                .register(&id, &entry.label, Arc::new(move || on_select(target.clone())));
            registered += 1;
        }
        registered
    }
}
