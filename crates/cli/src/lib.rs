pub mod baseline;
pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod doc_index;
pub mod drift;
pub mod error;
pub mod extract;
pub mod git;
pub mod name;
pub mod paths;
pub mod registry;
pub mod resolve;
pub mod rustdoc;
pub mod source;
pub mod tool;

pub use cli::{Cli, Command, LocateBaselineArgs, UpdateApiListArgs};
pub use config::Config;
pub use drift::Drift;
pub use error::{Error, ExitCode, Result};
pub use extract::ApiExtractor;
pub use name::{FloatTy, base_name};
pub use registry::{Registry, Routine};
pub use resolve::{ChangeSet, IgnoreList, TypeMatrix, resolve};

#[cfg(test)]
pub mod test_utils;
