//! Error types for the reel application.
//!
//! A hierarchical error taxonomy using `thiserror`, composing via `?` and
//! `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all domain-specific failures
//!   - [`CatalogError`] - Remote catalog request failures (network, server, decode)
//!   - [`crate::config::ConfigError`] - Configuration loading failures
//!   - [`crate::logging::LoggingError`] - Tracing setup failures
//!   - [`crate::address::AddressError`] - Address store read/write failures
//!   - `std::io::Error` - Terminal/TUI failures
//!
//! # Recovery Strategy
//!
//! Catalog errors are **non-fatal**: a failed boundary-crossing fetch aborts
//! that crossing, leaves the cursor at its last valid position, and surfaces
//! a transient dismissible notice; a failed initial or query-change fetch
//! leaves the page empty and renders the "no results / error" terminal view.
//! The carousel remains interactive either way and the next advance/retreat
//! re-attempts - there is no automatic retry. Config, logging, and terminal
//! errors at startup are fatal and reported on stderr.
//!
//! Stale fetch results are not errors at all: a resolved fetch whose
//! generation tag no longer matches the current one is discarded silently
//! (debug log only), never surfaced.

use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All domain-specific error types convert to `AppError` via `From`
/// implementations, enabling clean propagation with the `?` operator.
#[derive(Debug, Error)]
pub enum AppError {
    /// A remote catalog request failed.
    ///
    /// Non-fatal at runtime; see the module docs for the per-phase recovery
    /// policy.
    #[error("catalog request failed: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber initialization failed.
    #[error("logging setup failed: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The address store could not be read or written.
    #[error("address store error: {0}")]
    Address(#[from] crate::address::AddressError),

    /// Terminal or TUI rendering error.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors from a remote catalog search request.
///
/// The taxonomy distinguishes transport failures from server-reported
/// failures from undecodable responses, because the shell reports them
/// differently in the notice line. An empty result set is NOT an error:
/// it yields a page with zero items and the navigation layer renders the
/// "no results" terminal view.
///
/// Variants carry extracted string messages rather than wrapping transport
/// error types, so the pure core and its tests never depend on the HTTP
/// client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog could not be reached (DNS, connect, timeout, broken
    /// transport mid-response).
    #[error("network error: {message}")]
    Network {
        /// Transport error description, extracted at the HTTP boundary.
        message: String,
    },

    /// The catalog answered with a non-success status.
    #[error("catalog server error (HTTP {status})")]
    Server {
        /// HTTP status code of the response.
        status: u16,
    },

    /// The response body did not match the expected search payload.
    #[error("invalid catalog response: {message}")]
    Decode {
        /// Decoder error description, extracted at the HTTP boundary.
        message: String,
    },
}
