//! modget Core - Mod Resolver
//!
//! This crate resolves mod IDs on the lookup site to files on the CDN
//! and downloads them. Each ID goes through the same sequential pipeline:
//! fetch the lookup page, parse it, correct and split the file ID, then
//! download from the CDN.

mod batch;
mod download;
mod endpoints;
mod error;
mod file_id;
mod lookup;
mod parser;
mod resolver;

pub use batch::*;
pub use download::*;
pub use endpoints::{cdn_url, lookup_url};
pub use error::*;
pub use file_id::*;
pub use lookup::*;
pub use parser::*;
pub use resolver::*;
