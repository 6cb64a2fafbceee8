//! Infrastructure layer - Local backend, persistence and external tools

pub mod auth;
pub mod backend;
pub mod config;
pub mod editor;
pub mod objects;
pub mod store;
pub mod workspace;

pub use auth::LocalAuthService;
pub use backend::{AuthService, ObjectStore, RecordStore, SortOrder};
pub use config::Config;
pub use editor::EditorSession;
pub use objects::LocalObjectStore;
pub use store::LocalRecordStore;
pub use workspace::Workspace;
