//! Library side of the `packer` command-line exporter.

pub mod export;
pub mod logging;
pub mod types;
