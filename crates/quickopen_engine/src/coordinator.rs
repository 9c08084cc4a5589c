use std::sync::Arc;

use quickopen_core::{
    update, AppState, AppViewModel, AttemptId, CoordinatorTiming, Effect, Msg, QueryFailure,
    QuickOpenSettings, SearchResult, WakeToken,
};
use quickopen_logging::{qo_debug, qo_info, qo_warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::{ActivationRegistry, DocumentOpener, QueryClient, SidebarControl, ViewAdapter, ViewSink};

/// Everything the coordinator talks to, handed over at construction.
pub struct Collaborators {
    pub client: Arc<dyn QueryClient>,
    pub view: Box<dyn ViewSink>,
    pub registry: Box<dyn ActivationRegistry>,
    pub opener: Box<dyn DocumentOpener>,
    pub sidebar: Box<dyn SidebarControl>,
}

enum CoordinatorCommand {
    Activate { input: String },
    InputChanged { input: String },
    Select { activation_id: String },
    SettingsChanged(QuickOpenSettings),
    BrowsePathChanged(String),
}

/// Events produced by the coordinator's own timers, queries and callbacks.
enum Internal {
    Wake {
        token: WakeToken,
    },
    Completed {
        attempt: AttemptId,
        outcome: Result<SearchResult, QueryFailure>,
    },
    Select {
        activation_id: String,
    },
}

/// Handle to the task driving the search loop.
///
/// All state lives in one task; handles only post commands. The task ends
/// once every handle is dropped.
#[derive(Clone)]
pub struct SearchCoordinator {
    cmd_tx: mpsc::UnboundedSender<CoordinatorCommand>,
    view_rx: watch::Receiver<AppViewModel>,
}

impl SearchCoordinator {
    /// Spawns the driver task on the current tokio runtime.
    pub fn spawn(
        settings: QuickOpenSettings,
        timing: CoordinatorTiming,
        collaborators: Collaborators,
    ) -> (Self, JoinHandle<()>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let state = AppState::with_settings(settings, timing);
        let (view_tx, view_rx) = watch::channel(state.view());

        let select_tx = internal_tx.clone();
        let adapter = ViewAdapter::new(
            collaborators.view,
            collaborators.registry,
            Arc::new(move |activation_id| {
                let _ = select_tx.send(Internal::Select { activation_id });
            }),
        );

        let driver = Driver {
            state,
            client: collaborators.client,
            adapter,
            opener: collaborators.opener,
            sidebar: collaborators.sidebar,
            internal_tx,
            view_tx,
        };
        let handle = tokio::spawn(driver.run(cmd_rx, internal_rx));

        (Self { cmd_tx, view_rx }, handle)
    }

    /// The panel became visible with `input` in the search box.
    pub fn activate(&self, input: impl Into<String>) {
        self.send(CoordinatorCommand::Activate {
            input: input.into(),
        });
    }

    pub fn input_changed(&self, input: impl Into<String>) {
        self.send(CoordinatorCommand::InputChanged {
            input: input.into(),
        });
    }

    pub fn select(&self, activation_id: impl Into<String>) {
        self.send(CoordinatorCommand::Select {
            activation_id: activation_id.into(),
        });
    }

    pub fn update_settings(&self, settings: QuickOpenSettings) {
        self.send(CoordinatorCommand::SettingsChanged(settings));
    }

    pub fn set_browse_path(&self, path: impl Into<String>) {
        self.send(CoordinatorCommand::BrowsePathChanged(path.into()));
    }

    /// Latest view model, updated after every processed event.
    pub fn subscribe(&self) -> watch::Receiver<AppViewModel> {
        self.view_rx.clone()
    }

    fn send(&self, command: CoordinatorCommand) {
        if self.cmd_tx.send(command).is_err() {
            qo_warn!("Search coordinator is no longer running; command dropped");
        }
    }
}

struct Driver {
    state: AppState,
    client: Arc<dyn QueryClient>,
    adapter: ViewAdapter,
    opener: Box<dyn DocumentOpener>,
    sidebar: Box<dyn SidebarControl>,
    internal_tx: mpsc::UnboundedSender<Internal>,
    view_tx: watch::Sender<AppViewModel>,
}

impl Driver {
    async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<CoordinatorCommand>,
        mut internal_rx: mpsc::UnboundedReceiver<Internal>,
    ) {
        loop {
            let msg = tokio::select! {
                command = cmd_rx.recv() => match command {
                    Some(command) => command_msg(command),
                    None => break,
                },
                Some(internal) = internal_rx.recv() => self.internal_msg(internal),
            };
            self.dispatch(msg);
        }
        qo_debug!("Search coordinator stopped");
    }

    fn internal_msg(&self, internal: Internal) -> Msg {
        match internal {
            Internal::Wake { token } => {
                if token != self.state.wake_token() {
                    qo_debug!("Dropping superseded wake {:?}", token);
                }
                Msg::Wake { token, now: now() }
            }
            Internal::Completed { attempt, outcome } => {
                if !self.state.is_current_attempt(attempt) {
                    qo_debug!("Dropping response for superseded attempt {}", attempt);
                }
                Msg::QueryCompleted { attempt, outcome }
            }
            Internal::Select { activation_id } => Msg::EntrySelected { activation_id },
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        if was_dirty {
            let registered = self.adapter.render(&view);
            qo_debug!(
                "Rendered {} entries for keyword {:?} ({} newly registered)",
                view.entries.len(),
                view.rendered_keyword,
                registered
            );
        }
        self.view_tx.send_replace(view);

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleWake { token, after } => {
                let tx = self.internal_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tx.send(Internal::Wake { token });
                });
            }
            Effect::IssueQuery { attempt, query } => {
                qo_info!(
                    "IssueQuery attempt={} path={:?} keyword={:?} max_load={}",
                    attempt,
                    query.base_path,
                    query.keyword,
                    query.max_results
                );
                let client = self.client.clone();
                let tx = self.internal_tx.clone();
                tokio::spawn(async move {
                    let outcome = match client.fetch(&query).await {
                        Ok(result) => Ok(result),
                        Err(err) => {
                            qo_warn!("Query attempt {} failed: {}", attempt, err);
                            Err(QueryFailure::from(err))
                        }
                    };
                    let _ = tx.send(Internal::Completed { attempt, outcome });
                });
            }
            Effect::CollapseSidebar => self.sidebar.collapse(),
            Effect::OpenDocument { path } => {
                qo_info!("Opening {}", path);
                self.opener.open_or_reveal(&path);
            }
        }
    }
}

fn command_msg(command: CoordinatorCommand) -> Msg {
    match command {
        CoordinatorCommand::Activate { input } => Msg::Activated { input, now: now() },
        CoordinatorCommand::InputChanged { input } => Msg::InputChanged { input, now: now() },
        CoordinatorCommand::Select { activation_id } => Msg::EntrySelected { activation_id },
        CoordinatorCommand::SettingsChanged(settings) => Msg::SettingsChanged(settings),
        CoordinatorCommand::BrowsePathChanged(path) => Msg::BrowsePathChanged(path),
    }
}

/// Clock reading that follows tokio's (possibly paused) timer.
fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}
