// Copyright 2025 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Admission validation of `Cluster` create and update requests.
//!
//! Stages run in a fixed order:
//! 1. reference resolution (short-circuits on failure)
//! 2. immutability, update only
//! 3. component rules, with resource rules nested per component
//!
//! Stages 2 and 3 aggregate every violation they find. The decision reason is
//! the first violation in stage order.

pub mod component;
pub mod immutability;
pub mod reference;
pub mod resources;
pub mod topology;

pub use reference::{ResolvedTemplates, TemplateStore};
pub use topology::{ReplicationRule, TopologyRegistry, TopologyRule};

use crate::types::v1alpha1::cluster::Cluster;
use kube::core::admission::Operation;
use serde::Serialize;
use snafu::Snafu;
use strum::Display;
use tracing::debug;

/// Message of a volumeClaimTemplates change other than a storage resize.
pub const VOLUME_CLAIM_TEMPLATES_MESSAGE: &str =
    "volumeClaimTemplates is forbidden modification except for storage size.";

/// A single reason for rejecting a Cluster.
///
/// The rendered messages are matched verbatim by clients, keep them stable.
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum Violation {
    #[snafu(display("{}.{} \"{}\" not found", kind, crate::types::v1alpha1::GROUP, name))]
    ReferenceNotFound { kind: &'static str, name: String },

    #[snafu(display(
        "spec.clusterDefinitionRef: Invalid value: \"{}\": ClusterVersion \"{}\" is bound to ClusterDefinition \"{}\"",
        expected,
        version,
        actual
    ))]
    ReferenceMismatch {
        version: String,
        expected: String,
        actual: String,
    },

    #[snafu(display("failed to get {} \"{}\": {}", kind, name, message))]
    ReferenceLookup {
        kind: &'static str,
        name: String,
        message: String,
    },

    #[snafu(display("{}: {}", path, message))]
    ImmutableField { path: String, message: String },

    #[snafu(display("spec.components: Required value: components must be configured"))]
    EmptyComponents,

    #[snafu(display("spec.components[{}].name: Duplicate value: \"{}\"", name, name))]
    DuplicateComponentName { name: String },

    #[snafu(display(
        "spec.components[{}].type: Invalid value: \"{}\": {} is not found in ClusterDefinition.spec.components[*].typeName",
        component,
        type_name,
        type_name
    ))]
    UnknownComponentType { component: String, type_name: String },

    #[snafu(display(
        "spec.components[{}].replicas: Invalid value: {}: must be greater than or equal to 0",
        component,
        replicas
    ))]
    NegativeReplicas { component: String, replicas: i32 },

    #[snafu(display("spec.components[{}].{}: {}", component, field, message))]
    TopologyConstraint {
        component: String,
        field: &'static str,
        message: String,
    },

    #[snafu(display(
        "spec.components[{}].resources.{}[{}]: Invalid value: \"{}\": resource key is not cpu or memory or hugepages- ",
        component,
        field,
        key,
        key
    ))]
    ResourceKey {
        component: String,
        field: &'static str,
        key: String,
    },

    #[snafu(display(
        "spec.components[{}].resources.requests[{}]: Invalid value: \"{}\": must be less than or equal to {} limit",
        component,
        key,
        request,
        key
    ))]
    ResourceRange {
        component: String,
        key: String,
        request: String,
        limit: String,
    },

    #[snafu(display(
        "spec.components[{}].resources.{}[{}]: Invalid value: \"{}\": {}",
        component,
        field,
        key,
        value,
        message
    ))]
    InvalidQuantity {
        component: String,
        field: &'static str,
        key: String,
        value: String,
        message: String,
    },
}

/// Validation stage that produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum Stage {
    #[strum(to_string = "reference")]
    Reference,
    #[strum(to_string = "immutability")]
    Immutability,
    #[strum(to_string = "component")]
    Component,
    #[strum(to_string = "resource")]
    Resource,
}

impl Violation {
    pub fn stage(&self) -> Stage {
        match self {
            Violation::ReferenceNotFound { .. }
            | Violation::ReferenceMismatch { .. }
            | Violation::ReferenceLookup { .. } => Stage::Reference,
            Violation::ImmutableField { .. } => Stage::Immutability,
            Violation::EmptyComponents
            | Violation::DuplicateComponentName { .. }
            | Violation::UnknownComponentType { .. }
            | Violation::NegativeReplicas { .. }
            | Violation::TopologyConstraint { .. } => Stage::Component,
            Violation::ResourceKey { .. }
            | Violation::ResourceRange { .. }
            | Violation::InvalidQuantity { .. } => Stage::Resource,
        }
    }
}

/// Verdict returned to the admission transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDecision {
    pub admitted: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationDecision {
    pub fn admitted() -> Self {
        Self {
            admitted: true,
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            admitted: false,
            reason: Some(reason.into()),
        }
    }
}

/// Every violation found for one request, in stage order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn is_admitted(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    pub fn has_stage(&self, stage: Stage) -> bool {
        self.violations.iter().any(|v| v.stage() == stage)
    }

    pub fn decision(&self) -> ValidationDecision {
        match self.first() {
            None => ValidationDecision::admitted(),
            Some(violation) => ValidationDecision::rejected(violation.to_string()),
        }
    }
}

/// Entry point of the engine.
///
/// Holds no per-request state and is safe to share between concurrent requests.
pub struct ClusterValidator<S> {
    store: S,
    topology: TopologyRegistry,
}

impl<S: TemplateStore> ClusterValidator<S> {
    pub fn new(store: S) -> Self {
        Self::with_registry(store, TopologyRegistry::default())
    }

    pub fn with_registry(store: S, topology: TopologyRegistry) -> Self {
        Self { store, topology }
    }

    /// Dispatches on the admission operation.
    ///
    /// Delete and Connect are not validated. An Update without the previous
    /// object is validated like a Create.
    pub async fn validate(
        &self,
        operation: &Operation,
        old: Option<&Cluster>,
        new: &Cluster,
    ) -> ValidationReport {
        match (operation, old) {
            (Operation::Create, _) | (Operation::Update, None) => self.validate_create(new).await,
            (Operation::Update, Some(old)) => self.validate_update(old, new).await,
            (Operation::Delete, _) | (Operation::Connect, _) => ValidationReport::default(),
        }
    }

    pub async fn validate_create(&self, cluster: &Cluster) -> ValidationReport {
        let templates = match reference::resolve(&self.store, &cluster.spec).await {
            Ok(templates) => templates,
            Err(violation) => return self.finish(cluster, vec![violation]),
        };

        let violations = component::validate_components(
            &cluster.spec.components,
            &templates.definition,
            &self.topology,
        );
        self.finish(cluster, violations)
    }

    pub async fn validate_update(&self, old: &Cluster, new: &Cluster) -> ValidationReport {
        let templates = match reference::resolve(&self.store, &new.spec).await {
            Ok(templates) => templates,
            Err(violation) => return self.finish(new, vec![violation]),
        };

        let mut violations =
            immutability::check_immutability(&old.spec, &new.spec, &templates.definition);
        violations.extend(component::validate_components(
            &new.spec.components,
            &templates.definition,
            &self.topology,
        ));
        self.finish(new, violations)
    }

    fn finish(&self, cluster: &Cluster, violations: Vec<Violation>) -> ValidationReport {
        for violation in &violations {
            debug!(
                cluster = %cluster.name(),
                stage = %violation.stage(),
                "{}",
                violation
            );
        }
        ValidationReport::new(violations)
    }
}
