//! # ecf-report - enterprise custom field reporting
//!
//! Reads the enterprise custom field (ECF) catalog and the per-project field
//! values from a PWA site and renders a plain-text report. The pipeline is
//! deliberately synchronous and single-threaded: the site's query filter has
//! fixed arity, so projects are fetched in sentinel-padded batches, and
//! lookup-backed values are resolved one secondary query per entry.
//!
//! ## Quick Start
//!
//! ```bash
//! # Full report: catalog plus every project's field values
//! ecf-report --site-url https://contoso.sharepoint.com/sites/pwa report
//!
//! # Catalog only
//! ecf-report --site-url https://contoso.sharepoint.com/sites/pwa catalog
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`client`]: Remote service boundary and REST implementation
//! - [`batch`]: Fixed-arity batch planning
//! - [`resolve`]: Type-directed value resolution
//! - [`report`]: Plain-text rendering

/// Fixed-arity batch planning with sentinel padding.
pub mod batch;

/// Command-line interface definitions using clap.
pub mod cli;

/// Remote service boundary.
///
/// The `ProjectService` trait and its blocking REST implementation.
pub mod client;

/// Configuration loading and management.
///
/// Handles `.ecf.yml` files and flag/env overrides.
pub mod config;

/// Error types and result aliases.
///
/// Defines `EcfError` enum and `Result<T>` type alias.
pub mod error;

/// Data models.
///
/// Includes `FieldDefinition`, `FieldType`, `ProjectRecord`, `LookupEntry`.
pub mod model;

/// The report run, section by section.
pub mod pipeline;

/// Plain-text rendering of catalog and project sections.
pub mod report;

/// Type-directed resolution of raw field values, including per-entry
/// lookup-table queries.
pub mod resolve;

pub mod logging;
