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

use crate::types::v1alpha1::k8s::ComponentType;
use kube::{CustomResource, KubeSchema};
use serde::{Deserialize, Serialize};

/// Catalog of the component types a family of clusters may contain.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, KubeSchema, Default, PartialEq)]
#[kube(
    group = "dbaas.kubeblocks.io",
    version = "v1alpha1",
    kind = "ClusterDefinition",
    shortname = "cd",
    plural = "clusterdefinitions",
    singular = "clusterdefinition",
    printcolumn = r#"{"name":"Main-Component-Type", "type":"string", "jsonPath":".spec.components[0].typeName"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#,
    crates(serde_json = "k8s_openapi::serde_json")
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDefinitionSpec {
    /// Database family, e.g. `state.mysql`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[x_kube(validation = Rule::new("self.size() > 0").message("components must be configured"))]
    pub components: Vec<ClusterDefinitionComponent>,
}

#[derive(Deserialize, Serialize, Clone, Debug, KubeSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDefinitionComponent {
    pub type_name: String,

    /// Topology class of this component type.
    #[serde(default)]
    pub component_type: ComponentType,

    #[serde(default = "default_replicas")]
    pub default_replicas: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_type: Option<String>,
}

fn default_replicas() -> i32 {
    1
}

impl ClusterDefinition {
    /// Finds the template whose `typeName` equals `type_name`.
    pub fn component(&self, type_name: &str) -> Option<&ClusterDefinitionComponent> {
        self.spec
            .components
            .iter()
            .find(|c| c.type_name == type_name)
    }
}
