//! # Salespipe: flat-file to normalized-schema loading pipeline
//!
//! Salespipe consumes a single denormalized, tab-delimited sales
//! export in which each logical order row embeds semicolon-delimited
//! parallel lists (one sub-field per product line item), and loads six
//! related relational tables connected by surrogate keys and
//! foreign-key constraints, free of duplicates and orphan references.
//!
//! ## Pipeline shape
//!
//! Data flows one way: raw record reader -> entity extractors (with
//! parallel-list alignment) -> dependency-ordered loader -> surrogate
//! key resolver -> next extractor. Entities load strictly in
//! dependency order: Region -> Country -> ProductCategory -> Product
//! -> Customer -> OrderDetail. The schema is destroyed and rebuilt on
//! every run; the pipeline is not incremental.
//!
//! ## Example
//!
//! ```ignore
//! use salespipe::{Database, PipelineConfig};
//!
//! let db = Database::new("sales.db")?;
//! let mut conn = db.get_connection()?;
//! let stats = salespipe::run_with_config(
//!     "orders.tsv".as_ref(),
//!     &mut conn,
//!     &PipelineConfig { batch_size: 1000 },
//! )?;
//! println!("loaded {} order lines", stats.order_details);
//! ```

// Core pipeline modules
pub mod align;
pub mod error;
pub mod extract;
pub mod lookup;
pub mod pipeline;
pub mod reader;

// Database infrastructure
pub mod db;
pub mod models;
pub mod schema;

// Reporting queries over the loaded schema
pub mod analytics;

// Re-export key types
pub use db::{Database, DatabaseConfig, DbConnection, EntityKind};
pub use error::PipelineError;
pub use lookup::IdLookup;
pub use pipeline::{run, run_with_config, LoadStats, PipelineConfig};
pub use reader::{read_rows, RawRow};
