//! Command handlers, one per subcommand.

pub mod clean;
pub mod list;
