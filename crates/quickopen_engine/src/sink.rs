use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Callback run when a registered entry is activated.
pub type OnSelect = Arc<dyn Fn() + Send + Sync>;

/// Host list widget showing the categorized entries.
pub trait ViewSink: Send {
    fn clear(&mut self);
    /// Shows `filename` under the `category` heading and returns its activation id.
    fn add_entry(&mut self, category: &str, filename: &str) -> String;
}

/// Host command table that entries are activated through.
pub trait ActivationRegistry: Send {
    fn has_command(&self, id: &str) -> bool;
    fn register(&mut self, id: &str, label: &str, on_select: OnSelect);
}

pub trait DocumentOpener: Send {
    fn open_or_reveal(&mut self, path: &str);
}

pub trait SidebarControl: Send {
    fn collapse(&mut self);
}

struct RegisteredCommand {
    label: String,
    on_select: OnSelect,
}

/// In-memory [`ActivationRegistry`].
///
/// Clones share the same table, so a front-end can keep one handle to
/// execute commands while the coordinator registers through another.
/// Commands are never removed.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: Arc<Mutex<HashMap<String, RegisteredCommand>>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn label(&self, id: &str) -> Option<String> {
        self.lock().get(id).map(|command| command.label.clone())
    }

    /// Runs the callback registered for `id`. Returns `false` for unknown ids.
    pub fn execute(&self, id: &str) -> bool {
        let callback = self.lock().get(id).map(|command| command.on_select.clone());
        match callback {
            Some(on_select) => {
                on_select();
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, RegisteredCommand>> {
        self.commands.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ActivationRegistry for CommandRegistry {
    fn has_command(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    fn register(&mut self, id: &str, label: &str, on_select: OnSelect) {
        self.lock().insert(
            id.to_string(),
            RegisteredCommand {
                label: label.to_string(),
                on_select,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn execute_runs_registered_callback() {
        let mut registry = CommandRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        registry.register(
            "docs/a.md",
            "a.md",
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(registry.has_command("docs/a.md"));
        assert_eq!(registry.label("docs/a.md").as_deref(), Some("a.md"));
        assert!(registry.execute("docs/a.md"));
        assert!(!registry.execute("docs/missing.md"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clones_share_the_table() {
        let mut registry = CommandRegistry::new();
        let observer = registry.clone();
        registry.register("src/x.py", "x.py", Arc::new(|| {}));

        assert_eq!(observer.len(), 1);
        assert!(observer.has_command("src/x.py"));
    }
}
