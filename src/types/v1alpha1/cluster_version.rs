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

use k8s_openapi::api::core::v1 as corev1;
use kube::{CustomResource, KubeSchema};
use serde::{Deserialize, Serialize};

/// Binds container images and configuration to the types of one ClusterDefinition.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, KubeSchema, Default, PartialEq)]
#[kube(
    group = "dbaas.kubeblocks.io",
    version = "v1alpha1",
    kind = "ClusterVersion",
    shortname = "cv",
    plural = "clusterversions",
    singular = "clusterversion",
    printcolumn = r#"{"name":"Cluster-Definition", "type":"string", "jsonPath":".spec.clusterDefinitionRef"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#,
    crates(serde_json = "k8s_openapi::serde_json")
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterVersionSpec {
    #[x_kube(validation = Rule::new("self != ''").message("clusterDefinitionRef must be not empty"))]
    pub cluster_definition_ref: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ClusterVersionComponent>,
}

#[derive(Deserialize, Serialize, Clone, Debug, KubeSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterVersionComponent {
    /// References `ClusterDefinition.spec.components[*].typeName`.
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<corev1::Container>,
}
