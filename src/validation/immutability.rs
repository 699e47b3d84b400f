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

//! Field-level change rules for Cluster updates.
//!
//! Each table lists the fields of one object kind with the policy applied when
//! old and new differ. Adding an immutable field is a table edit.

use crate::types::v1alpha1::cluster::ClusterSpec;
use crate::types::v1alpha1::cluster_definition::ClusterDefinition;
use crate::types::v1alpha1::component::ClusterComponent;
use crate::validation::{VOLUME_CLAIM_TEMPLATES_MESSAGE, Violation};

const IMMUTABLE_MESSAGE: &str = "field is immutable";
const TYPE_FIELD: &str = "type";

pub enum ChangePolicy<T> {
    /// Any difference is rejected.
    Immutable { equal: fn(&T, &T) -> bool },

    /// Changes are allowed here and validated by other stages.
    Mutable,

    /// Changes are allowed only when `allowed(old, new)` holds.
    Constrained {
        allowed: fn(&T, &T) -> bool,
        message: &'static str,
    },
}

pub struct FieldRule<T> {
    /// Path relative to the table's prefix.
    pub path: &'static str,
    pub policy: ChangePolicy<T>,
}

impl<T> FieldRule<T> {
    fn check(&self, prefix: &str, old: &T, new: &T) -> Option<Violation> {
        let message = match &self.policy {
            ChangePolicy::Mutable => return None,
            ChangePolicy::Immutable { equal } if equal(old, new) => return None,
            ChangePolicy::Immutable { .. } => IMMUTABLE_MESSAGE,
            ChangePolicy::Constrained { allowed, .. } if allowed(old, new) => return None,
            ChangePolicy::Constrained { message, .. } => *message,
        };
        Some(Violation::ImmutableField {
            path: format!("{}.{}", prefix, self.path),
            message: message.to_string(),
        })
    }
}

pub static CLUSTER_FIELDS: &[FieldRule<ClusterSpec>] = &[
    FieldRule {
        path: "clusterDefinitionRef",
        policy: ChangePolicy::Immutable {
            equal: same_cluster_definition_ref,
        },
    },
    FieldRule {
        path: "clusterVersionRef",
        policy: ChangePolicy::Mutable,
    },
    FieldRule {
        path: "terminationPolicy",
        policy: ChangePolicy::Mutable,
    },
];

pub static COMPONENT_FIELDS: &[FieldRule<ClusterComponent>] = &[
    FieldRule {
        path: TYPE_FIELD,
        policy: ChangePolicy::Immutable {
            equal: same_component_type,
        },
    },
    FieldRule {
        path: "volumeClaimTemplates",
        policy: ChangePolicy::Constrained {
            allowed: storage_size_only,
            message: VOLUME_CLAIM_TEMPLATES_MESSAGE,
        },
    },
    FieldRule {
        path: "replicas",
        policy: ChangePolicy::Mutable,
    },
    FieldRule {
        path: "primaryIndex",
        policy: ChangePolicy::Mutable,
    },
    FieldRule {
        path: "monitor",
        policy: ChangePolicy::Mutable,
    },
    FieldRule {
        path: "resources",
        policy: ChangePolicy::Mutable,
    },
];

fn same_cluster_definition_ref(old: &ClusterSpec, new: &ClusterSpec) -> bool {
    old.cluster_definition_ref == new.cluster_definition_ref
}

fn same_component_type(old: &ClusterComponent, new: &ClusterComponent) -> bool {
    old.type_ == new.type_
}

/// Same templates in the same order, differing at most in requested storage.
///
/// A storage request may be resized but not removed.
fn storage_size_only(old: &ClusterComponent, new: &ClusterComponent) -> bool {
    old.volume_claim_templates.len() == new.volume_claim_templates.len()
        && old
            .volume_claim_templates
            .iter()
            .zip(&new.volume_claim_templates)
            .all(|(o, n)| {
                o.without_storage_size() == n.without_storage_size()
                    && (o.storage_size().is_none() || n.storage_size().is_some())
            })
}

/// Finds the previous version of `component`.
///
/// Named components match by name, unnamed ones by position.
fn counterpart<'a>(
    old: &'a [ClusterComponent],
    index: usize,
    component: &ClusterComponent,
) -> Option<&'a ClusterComponent> {
    if component.name.is_empty() {
        old.get(index).filter(|c| c.name.is_empty())
    } else {
        old.iter().find(|c| c.name == component.name)
    }
}

/// Every forbidden change between `old` and `new`.
///
/// Components absent from `old` are new and have nothing to compare. A type
/// missing from `definition` is left to the component rules, which report it
/// as unknown rather than immutable.
pub fn check_immutability(
    old: &ClusterSpec,
    new: &ClusterSpec,
    definition: &ClusterDefinition,
) -> Vec<Violation> {
    let mut violations: Vec<Violation> = CLUSTER_FIELDS
        .iter()
        .filter_map(|rule| rule.check("spec", old, new))
        .collect();

    for (index, component) in new.components.iter().enumerate() {
        let Some(previous) = counterpart(&old.components, index, component) else {
            continue;
        };
        let known_type = definition.component(&component.type_).is_some();
        let prefix = format!("spec.components[{}]", component.identity(index));
        violations.extend(
            COMPONENT_FIELDS
                .iter()
                .filter(|rule| known_type || rule.path != TYPE_FIELD)
                .filter_map(|rule| rule.check(&prefix, previous, component)),
        );
    }

    violations
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::tests::{create_test_cluster, create_test_cluster_definition, set_storage_size};
    use crate::types::v1alpha1::k8s::TerminationPolicy;

    fn spec() -> ClusterSpec {
        create_test_cluster("mysql-def", "mysql-ver", "mysql").spec
    }

    fn check(old: &ClusterSpec, new: &ClusterSpec) -> Vec<Violation> {
        check_immutability(old, new, &create_test_cluster_definition("mysql-def"))
    }

    #[test]
    fn test_unchanged_spec_has_no_violations() {
        assert!(check(&spec(), &spec()).is_empty());
    }

    #[test]
    fn test_cluster_definition_ref_is_immutable() {
        let old = spec();
        let mut new = old.clone();
        new.cluster_definition_ref = "mysql-def-2".to_string();

        let violations = check(&old, &new);

        assert_eq!(
            violations,
            vec![Violation::ImmutableField {
                path: "spec.clusterDefinitionRef".to_string(),
                message: IMMUTABLE_MESSAGE.to_string(),
            }]
        );
        assert_eq!(
            violations[0].to_string(),
            "spec.clusterDefinitionRef: field is immutable"
        );
    }

    #[test]
    fn test_mutable_cluster_fields() {
        let old = spec();
        let mut new = old.clone();
        new.cluster_version_ref = "mysql-ver-2".to_string();
        new.termination_policy = TerminationPolicy::Halt;

        assert!(check(&old, &new).is_empty());
    }

    #[test]
    fn test_component_type_is_immutable() {
        let old = spec();
        let mut new = old.clone();
        new.components[1].type_ = "replicasets".to_string();

        let violations = check(&old, &new);

        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            "spec.components[proxy].type: field is immutable"
        );
    }

    #[test]
    fn test_mutable_component_fields() {
        let old = spec();
        let mut new = old.clone();
        new.components[0].replicas = Some(3);
        new.components[0].primary_index = Some(2);
        new.components[0].monitor = true;
        new.components[0].resources = Some(Default::default());

        assert!(check(&old, &new).is_empty());
    }

    #[test]
    fn test_storage_size_change_allowed() {
        let old = spec();
        let mut new = old.clone();
        set_storage_size(&mut new.components[0].volume_claim_templates[0], "10Gi");

        assert!(check(&old, &new).is_empty());
    }

    #[test]
    fn test_volume_claim_template_changes_rejected() {
        let old = spec();

        let mut renamed = old.clone();
        renamed.components[0].volume_claim_templates[0].name = "test".to_string();

        let mut added = old.clone();
        let extra = added.components[0].volume_claim_templates[0].clone();
        added.components[0].volume_claim_templates.push(extra);

        let mut removed = old.clone();
        removed.components[0].volume_claim_templates.clear();

        let mut storage_class = old.clone();
        if let Some(spec) = storage_class.components[0].volume_claim_templates[0].spec.as_mut() {
            spec.storage_class_name = Some("fast".to_string());
        }

        for new in [renamed, added, removed, storage_class] {
            let violations = check(&old, &new);
            assert_eq!(violations.len(), 1, "{:?}", new.components[0]);
            assert_eq!(
                violations[0].to_string(),
                format!(
                    "spec.components[replicasets].volumeClaimTemplates: {}",
                    VOLUME_CLAIM_TEMPLATES_MESSAGE
                )
            );
        }
    }

    #[test]
    fn test_new_components_are_unchecked() {
        let old = spec();
        let mut new = old.clone();
        new.components[1].name = "proxy-2".to_string();
        new.components[1].type_ = "other".to_string();

        assert!(check(&old, &new).is_empty());
    }

    #[test]
    fn test_components_match_by_name_not_position() {
        let old = spec();
        let mut new = old.clone();
        new.components.reverse();

        assert!(check(&old, &new).is_empty());
    }

    #[test]
    fn test_unnamed_components_match_by_index() {
        let mut old = spec();
        old.components[1].name = String::new();
        let mut new = old.clone();
        new.components[1].type_ = "replicasets".to_string();

        let violations = check(&old, &new);

        assert_eq!(violations.len(), 1);
        assert!(violations[0].to_string().starts_with("spec.components[1].type"));
    }

    #[test]
    fn test_violations_are_aggregated() {
        let old = spec();
        let mut new = old.clone();
        new.cluster_definition_ref = "other".to_string();
        new.components[0].type_ = "proxy".to_string();
        new.components[0].volume_claim_templates[0].name = "test".to_string();

        let violations = check(&old, &new);

        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_unknown_new_type_is_left_to_component_rules() {
        let old = spec();
        let mut new = old.clone();
        new.components[0].type_ = "replicaset".to_string();

        assert!(check(&old, &new).is_empty());
    }

    #[test]
    fn test_removing_storage_request_rejected() {
        let old = spec();
        let mut new = old.clone();
        if let Some(resources) = new.components[0].volume_claim_templates[0]
            .spec
            .as_mut()
            .and_then(|spec| spec.resources.as_mut())
        {
            resources.requests = Some(Default::default());
        }

        let violations = check(&old, &new);

        assert_eq!(violations.len(), 1);
        assert!(violations[0].to_string().contains(VOLUME_CLAIM_TEMPLATES_MESSAGE));
    }
}
