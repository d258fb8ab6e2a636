//! # strata_cache
//!
//! Per-file fact cache for Strata.
//!
//! Extracting structural facts from every source file on every run is
//! expensive. This crate lets repeated runs skip unchanged files while never
//! handing back a fact that is stale or was produced by an incompatible
//! version of the tool.
//!
//! ## Cache Strategy
//!
//! 1. **Content-addressed**: each entry records a BLAKE3 digest of the file;
//!    any observed change evicts the entry immediately
//! 2. **Version-gated**: the on-disk document is discarded wholesale when its
//!    format version differs from the running tool
//! 3. **Touch-gated**: only entries consulted during the current run are
//!    written back
//!
//! ## Storage
//!
//! The cache is a single JSON document, replaced atomically on write. Every
//! problem with it degrades to a cold run; only a missing source file is an
//! error.
//!
//! ## Example
//!
//! ```rust,ignore
//! use strata_cache::{FactCache, FileFactCache};
//!
//! let mut cache: FileFactCache<MyFact> = FileFactCache::new(".strata.cache");
//! let fact = match cache.get(path)? {
//!     Some(fact) => fact.clone(),
//!     None => {
//!         let fact = extract(path)?;
//!         cache.set(path, fact.clone())?;
//!         fact
//!     }
//! };
//! cache.write();
//! ```

mod codec;
mod entry;
mod error;
mod fingerprint;
mod key;
mod memory;
mod store;

pub use codec::CacheFile;
pub use entry::{CacheDocument, CacheEntry};
pub use error::CacheError;
pub use fingerprint::Fingerprint;
pub use key::CacheKey;
pub use memory::MemoryFactCache;
pub use store::{DEFAULT_FORMAT_VERSION, FactCache, FileFactCache, RetentionPolicy};
