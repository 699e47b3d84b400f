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

use crate::types::v1alpha1::cluster_definition::ClusterDefinition;
use crate::types::v1alpha1::component::ClusterComponent;
use crate::validation::Violation;
use crate::validation::resources::validate_resources;
use crate::validation::topology::TopologyRegistry;
use std::collections::BTreeSet;

/// Validates every component of a Cluster against its resolved definition.
pub fn validate_components(
    components: &[ClusterComponent],
    definition: &ClusterDefinition,
    registry: &TopologyRegistry,
) -> Vec<Violation> {
    if components.is_empty() {
        return vec![Violation::EmptyComponents];
    }

    let mut violations = Vec::new();
    let mut seen = BTreeSet::new();

    for (index, component) in components.iter().enumerate() {
        let identity = component.identity(index);

        if !component.name.is_empty() && !seen.insert(component.name.as_str()) {
            violations.push(Violation::DuplicateComponentName {
                name: component.name.clone(),
            });
        }

        if let Some(replicas) = component.replicas.filter(|r| *r < 0) {
            violations.push(Violation::NegativeReplicas {
                component: identity.clone(),
                replicas,
            });
        }

        let Some(template) = definition.component(&component.type_) else {
            violations.push(Violation::UnknownComponentType {
                component: identity,
                type_name: component.type_.clone(),
            });
            continue;
        };

        violations.extend(registry.validate(&identity, component, template));

        if let Some(resources) = &component.resources {
            violations.extend(validate_resources(
                &identity,
                resources.requests.as_ref(),
                resources.limits.as_ref(),
            ));
        }
    }

    violations
}
