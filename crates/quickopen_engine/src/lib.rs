//! Quick-open engine: remote query client and the runtime that drives the core state machine.
mod client;
mod coordinator;
mod sink;
mod types;
mod view;
mod wire;

pub use client::{
    build_request_url, ClientSettings, QueryClient, ReqwestQueryClient, QUICKOPEN_ENDPOINT,
};
pub use coordinator::{Collaborators, SearchCoordinator};
pub use sink::{
    ActivationRegistry, CommandRegistry, DocumentOpener, OnSelect, SidebarControl, ViewSink,
};
pub use types::{FailureKind, QueryError};
pub use view::ViewAdapter;
pub use wire::decode_response;
