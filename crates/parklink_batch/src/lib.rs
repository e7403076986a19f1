//! File-driven batch runs on top of `parklink_core`.
//!
//! Loads entity catalogs from JSON, runs entity linking or many proximity
//! searches (in parallel across reference points), summarizes link reports and
//! exports results to CSV or JSON.
//!
//! # Quick Start
//!
//! ```no_run
//! use parklink_batch::{export, input, runner, LinkSummary};
//! use parklink_core::{LinkConfig, LinkStrategy};
//!
//! let parks = input::load_entities("parks.json")?;
//! let graph = input::load_entities("knowledge_graph.json")?;
//! let report = runner::run_linking(&parks, &graph, LinkStrategy::Greedy, LinkConfig::default())?;
//! println!("{}", LinkSummary::from_report(&report, parks.len(), graph.len()));
//! export::links_to_csv(&report.links, "links.csv")?;
//! # Ok::<(), parklink_batch::BatchError>(())
//! ```
//!
//! # Modules
//!
//! - [`input`]: JSON entity and config loading
//! - [`runner`]: linking runs and parallel nearby batches
//! - [`summary`]: aggregate statistics for a link report
//! - [`export`]: CSV and JSON output

pub mod error;
pub mod export;
pub mod input;
pub mod runner;
pub mod summary;

pub use error::BatchError;
pub use runner::{run_linking, run_nearby_batch, NearbyBatchResult};
pub use summary::LinkSummary;
