//! The two migration pipelines, one module per subcommand.

pub mod convert;
pub mod setup;
