//! Reading-view extraction stages.
//!
//! Each stage is a public function over a parsed document plus explicit
//! parameters (page URL, image collection, options), so it can run and be
//! tested on its own. [`pipeline::run`] chains them in order.
//!
//! # Module Structure
//!
//! - `indexer`: pre-order `data-dfs-index` stamping
//! - `visibility`: hidden-element and zero-size image filters
//! - `images`: image harvesting, purging and reinsertion
//! - `links`: link normalisation and the supporting link sets
//! - `cleanup`: single-article shortcut, whitespace and comments
//! - `tags`: tag catalogs, tag stripping and reformatting
//! - `ads`: link-density pruning
//! - `pruning`: text-to-markup content pruning
//! - `collapse`: redundant wrapper collapsing
//! - `assembly`: reading-view scaffolding
//! - `pipeline`: stage orchestration
//!
//! # Usage
//!
//! ```rust
//! use tranquil_reader::dom;
//! use tranquil_reader::extractor::pipeline::{run, PipelineContext};
//! use tranquil_reader::Options;
//!
//! let doc = dom::parse("<html><body><article><h1>Hi</h1><p>Some text.</p></article></body></html>");
//! let options = Options::default();
//! let ctx = PipelineContext::new("https://example.com/post", &options);
//! let output = run(&doc, &ctx)?;
//! assert!(output.warnings.is_empty());
//! # Ok::<(), tranquil_reader::Error>(())
//! ```

pub mod ads;
pub mod assembly;
pub mod cleanup;
pub mod collapse;
pub mod images;
pub mod indexer;
pub mod links;
pub mod pipeline;
pub mod pruning;
pub mod tags;
pub mod visibility;

pub use images::{ImageCollection, ImageRecord};
pub use links::{LinkRecord, MoreLinksSet, NavLinksSet};
pub use pipeline::{run, PipelineContext, PipelineOutput};
