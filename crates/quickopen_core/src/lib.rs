//! Quick-open core: pure search coordination state machine and view-model helpers.
mod effect;
mod msg;
mod path;
mod query;
mod settings;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use path::normalize_path;
pub use query::{CategoryListing, SearchQuery, SearchResult};
pub use settings::{CoordinatorTiming, QuickOpenSettings, DEFAULT_EXCLUDES, DEFAULT_MAX_LOAD};
pub use state::{AppState, AttemptId, QueryFailure, SearchPhase, WakeToken};
pub use update::update;
pub use view_model::{activation_id, AppViewModel, ViewEntry};
