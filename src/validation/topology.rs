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

use crate::types::v1alpha1::cluster_definition::ClusterDefinitionComponent;
use crate::types::v1alpha1::component::ClusterComponent;
use crate::types::v1alpha1::k8s::ComponentType;
use crate::validation::Violation;
use std::collections::BTreeMap;

/// Semantic checks specific to one topology class.
pub trait TopologyRule: Send + Sync {
    /// `component` is the identity used in violation paths.
    fn validate(
        &self,
        component: &str,
        spec: &ClusterComponent,
        template: &ClusterDefinitionComponent,
    ) -> Vec<Violation>;
}

/// Single primary among `replicas` instances.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplicationRule;

impl TopologyRule for ReplicationRule {
    fn validate(
        &self,
        component: &str,
        spec: &ClusterComponent,
        template: &ClusterDefinitionComponent,
    ) -> Vec<Violation> {
        let replicas = spec.effective_replicas(template.default_replicas);
        if replicas < 1 {
            return vec![Violation::TopologyConstraint {
                component: component.to_string(),
                field: "replicas",
                message: format!(
                    "Invalid value: {}: replication components need at least 1 replica",
                    replicas
                ),
            }];
        }

        match spec.primary_index {
            Some(index) if !(0..replicas).contains(&index) => {
                vec![Violation::TopologyConstraint {
                    component: component.to_string(),
                    field: "primaryIndex",
                    message: format!(
                        "Invalid value: {}: {} is out of range, must be in [0, {})",
                        index, index, replicas
                    ),
                }]
            }
            _ => Vec::new(),
        }
    }
}

/// Topology rules keyed by class. Classes without an entry have no extra checks.
pub struct TopologyRegistry {
    rules: BTreeMap<ComponentType, Box<dyn TopologyRule>>,
}

impl TopologyRegistry {
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Replaces any rule already registered for `component_type`.
    pub fn register(mut self, component_type: ComponentType, rule: impl TopologyRule + 'static) -> Self {
        self.rules.insert(component_type, Box::new(rule));
        self
    }

    pub fn rule(&self, component_type: ComponentType) -> Option<&dyn TopologyRule> {
        self.rules.get(&component_type).map(|rule| rule.as_ref())
    }

    pub fn validate(
        &self,
        component: &str,
        spec: &ClusterComponent,
        template: &ClusterDefinitionComponent,
    ) -> Vec<Violation> {
        self.rule(template.component_type)
            .map(|rule| rule.validate(component, spec, template))
            .unwrap_or_default()
    }
}

impl Default for TopologyRegistry {
    fn default() -> Self {
        Self::empty().register(ComponentType::Replication, ReplicationRule)
    }
}
