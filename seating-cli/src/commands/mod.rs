//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `load`: Load restaurants and diners from CSV
//! - `find`: Find restaurants that can seat a group
//! - `book`: Book the best-fit table at a restaurant
//! - `cancel`: Cancel a reservation
//! - `list`: List reservations
//! - `completions`: Generate shell completion scripts

pub mod book;
pub mod cancel;
pub mod completions;
pub mod find;
pub mod init;
pub mod list;
pub mod load;

pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use find::FindCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use load::LoadCommand;
