// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # accion
//!
//! Pylons-style action handler registration for web configurators.
//!
//! `accion` extends a web-application configurator with a single
//! directive, [`add_handler`](AddHandler::add_handler): register a
//! group of related request-handling entry points (the "actions" of a
//! [`Handler`]) against one URL route, instead of declaring one route
//! per endpoint.
//!
//! ## How actions are resolved
//!
//! - Pattern embeds an action placeholder (`/blog/{action}` or the
//!   legacy `/blog/:action`): every exposable method of the handler
//!   registers as a view, each guarded by an [`ActionPredicate`] that
//!   matches only its own resolved action name at request time.
//! - No placeholder: the route is already action-specific. The explicit
//!   action from the options (or the reserved default) picks the single
//!   target method, and no predicate is attached.
//!
//! ## Quick Start
//!
//! ```rust
//! use accion::{AddHandler, Configurator, Handler, HandlerOptions};
//!
//! let mut config = Configurator::new();
//! let handler = Handler::new("BlogHandler")
//!     .method("index")
//!     .method("archive");
//!
//! config.add_handler("blog", Some("/blog/{action}"), handler, HandlerOptions::default())?;
//!
//! // One view per method, each guarded by its own action predicate.
//! assert_eq!(config.views().len(), 2);
//! config.commit()?;
//! # Ok::<(), accion::ConfigError>(())
//! ```
//!
//! ## Handlers are manifests
//!
//! A [`Handler`] is an explicit manifest built by the caller: declared
//! methods, per-method [`ExposureRecord`]s, an [`AutoExpose`] rule and
//! an optional view decorator. There is no runtime reflection: the
//! manifest is the single source of what the engine enumerates.

/// The configurator surface and process-wide settings.
pub mod config;
/// Error types and reporting.
pub mod error;
/// Per-method exposure metadata.
pub mod exposure;
/// Handler manifests.
pub mod handler;
/// Request-time predicates guarding registered views.
pub mod predicate;
/// The handler-registration directive.
pub mod register;
/// Route patterns and the action placeholder.
pub mod route;
/// View registrations submitted to the configurator.
pub mod view;

pub use config::*;
pub use error::*;
pub use exposure::*;
pub use handler::*;
pub use predicate::*;
pub use register::*;
pub use route::*;
pub use view::*;
