//! Application layer - Use cases and orchestration

pub mod entries;
pub mod init;
pub mod manage_config;
pub mod session;

pub use entries::{EntryRepository, LoadTicket, SaveOutcome, UploadFailure};
pub use manage_config::ConfigService;
pub use session::SessionContext;
