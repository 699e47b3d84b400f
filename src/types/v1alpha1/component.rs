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

use crate::types::v1alpha1::persistence::VolumeClaimTemplate;
use k8s_openapi::api::core::v1 as corev1;
use kube::KubeSchema;
use serde::{Deserialize, Serialize};

/// One named, typed sub-group of a Cluster.
#[derive(Deserialize, Serialize, Clone, Debug, KubeSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterComponent {
    /// Unique within the Cluster.
    pub name: String,

    /// References `ClusterDefinition.spec.components[*].typeName`.
    #[serde(rename = "type")]
    pub type_: String,

    /// Falls back to the template's `defaultReplicas` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[x_kube(validation = Rule::new("self >= 0").message("replicas must not be negative"))]
    pub replicas: Option<i32>,

    /// Index of the primary instance, only meaningful for Replication components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_index: Option<i32>,

    #[serde(default)]
    pub monitor: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<corev1::ResourceRequirements>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_claim_templates: Vec<VolumeClaimTemplate>,
}

impl ClusterComponent {
    /// Human readable identity used in violation paths.
    ///
    /// Unnamed components are identified by their position.
    pub fn identity(&self, index: usize) -> String {
        if self.name.is_empty() {
            index.to_string()
        } else {
            self.name.clone()
        }
    }

    /// Replicas after applying the template default.
    pub fn effective_replicas(&self, default_replicas: i32) -> i32 {
        self.replicas.unwrap_or(default_replicas)
    }
}
