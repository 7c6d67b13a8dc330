// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! View registrations submitted to the configurator.
//!
//! A [`ViewRegistration`] is the unit the registration engine hands to
//! the configurator: which handler method to invoke, on which route,
//! guarded by which predicates, with which merged configuration.
//! Ownership passes to the configurator's pending list on submission;
//! the host framework builds the actual view pipeline from it.

use crate::exposure::ExposureRecord;
use crate::predicate::{MatchParams, ViewPredicate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A view callable as the host framework builds it from a registration:
/// match params in, rendered body out.
pub type ViewCallable = Arc<dyn Fn(&MatchParams) -> String + Send + Sync>;

/// A hook wrapping every view callable generated for a handler.
///
/// The configurator never invokes views itself; the hook is carried on
/// each registration and applied by the host framework when it builds
/// the final view pipeline.
pub type ViewDecorator = Arc<dyn Fn(ViewCallable) -> ViewCallable + Send + Sync>;

/// Configuration merged into a view registration.
///
/// Handler-level defaults (e.g. the normalized default permission) are
/// overridden per-record; passthrough extras merge with record values
/// winning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewOptions {
    /// Permission required to invoke the view.
    pub permission: Option<String>,

    /// Renderer applied to the view's return value.
    pub renderer: Option<String>,

    /// Arbitrary passthrough configuration.
    pub extras: BTreeMap<String, Value>,
}

impl ViewOptions {
    /// Merges an exposure record's overrides over handler-level
    /// defaults. The record is read, never mutated.
    pub(crate) fn merged(defaults: &ViewOptions, record: &ExposureRecord) -> ViewOptions {
        let mut extras = defaults.extras.clone();
        extras.extend(record.extras.iter().map(|(k, v)| (k.clone(), v.clone())));
        ViewOptions {
            permission: record
                .permission
                .clone()
                .or_else(|| defaults.permission.clone()),
            renderer: record.renderer.clone().or_else(|| defaults.renderer.clone()),
            extras,
        }
    }
}

/// A unit of view configuration submitted to the configurator.
#[derive(Clone)]
pub struct ViewRegistration {
    /// Name of the handler supplying the view.
    pub handler: String,

    /// The handler method to invoke. `None` means the handler's
    /// default action.
    pub attr: Option<String>,

    /// The route this view is registered against.
    pub route_name: String,

    /// Decorator applied around the view callable, if any.
    pub decorator: Option<ViewDecorator>,

    /// Predicates guarding the view at request time.
    pub predicates: Vec<ViewPredicate>,

    /// Merged view configuration.
    pub options: ViewOptions,
}

impl ViewRegistration {
    /// Tests every predicate against a request's match params.
    pub fn predicates_match(&self, params: Option<&MatchParams>) -> bool {
        self.predicates.iter().all(|p| p.matches(params))
    }

    /// The conflict-detection discriminator: route name plus the sorted
    /// predicate identity texts. Two registrations with equal
    /// discriminators conflict at commit time.
    pub(crate) fn discriminator(&self) -> String {
        let mut texts: Vec<String> = self.predicates.iter().map(|p| p.text()).collect();
        texts.sort();
        format!("view route='{}' predicates=[{}]", self.route_name, texts.join(", "))
    }
}

impl fmt::Debug for ViewRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewRegistration")
            .field("handler", &self.handler)
            .field("attr", &self.attr)
            .field("route_name", &self.route_name)
            .field("decorator", &self.decorator.as_ref().map(|_| ".."))
            .field("predicates", &self.predicates)
            .field("options", &self.options)
            .finish()
    }
}
