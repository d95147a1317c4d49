//! CAD History Operations Layer
//!
//! Typed operations over a project's version history, shared by the CLI and
//! any other front end.
//!
//! ## Architecture
//!
//! - **ProjectData**: the JSON data source (project, commits, trees)
//! - **HistoryBrowser**: a session holding selection and expansion state
//! - **Collaborators**: traits that fulfil download, fork and preview intents
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cad_history_ops::{Config, HistoryBrowser, LoggingCollaborators};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let mut browser = HistoryBrowser::from_config(&config)?;
//!
//!     browser.select("commit-8")?;
//!     let intent = browser.download("RoboticArm_Assembly.SLDASM", &LoggingCollaborators)?;
//!     println!("{} files, {}", intent.files().len(), intent.total_size());
//!     Ok(())
//! }
//! ```

mod browser;
mod collaborators;
mod config;
mod data;
mod error;
mod sample;
mod summary;

// Re-export public API
pub use browser::{validate_branch_name, CommitDownload, HistoryBrowser, MAX_BRANCH_NAME_CHARS};
pub use collaborators::{BranchCreator, FileTransfer, LoggingCollaborators, PreviewRenderer};
pub use config::{Config, LayoutMode, CONFIG_PATH_ENV, DATA_PATH_ENV, SHARE_URL_ENV};
pub use data::ProjectData;
pub use error::{OpsError, OpsResult};
pub use summary::{BranchSummary, ProjectSummary};
