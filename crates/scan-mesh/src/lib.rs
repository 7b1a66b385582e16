//! Radar scan to map-plane mesh construction.
//!
//! Converts one polar scan (N rays x G gates of reflectivity codes plus scan
//! geometry) into a triangle mesh in normalized Web Mercator coordinates,
//! built for repeated low-latency rebuilds as a user steps through scans.
//!
//! # Architecture
//!
//! ```text
//! source id
//!      |
//!      v
//! MeshPipeline::rebuild(id).await
//!      |
//!      |-- ScanCache lookup
//!      |        |
//!      |        |-- hit: reuse decoded scan + azimuth edges
//!      |        |
//!      |        `-- miss: ScanSource::fetch (async) -> PolarScan + edges
//!      |
//!      |-- MeshBuilder::rebuild (sync, exclusive buffer ownership)
//!      |        edge rings -> interpolation optimizer -> triangle emission
//!      |
//!      `-- copy-on-publish -> MeshOutput
//! ```
//!
//! The buffers grow but never shrink across rebuilds; a smaller scan reuses
//! the allocation and the consumer draws `logical_count` vertices.

pub mod buffers;
pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod subdivide;

pub use buffers::MeshBuffers;
pub use builder::MeshBuilder;
pub use cache::{CacheStats, ScanCache, ScanEntry, ScanRecord};
pub use config::MeshConfig;
pub use error::{MeshError, Result};
pub use pipeline::{MeshOutput, MeshPipeline};
pub use source::{RawScan, ScanSource};
pub use subdivide::segment_count;
