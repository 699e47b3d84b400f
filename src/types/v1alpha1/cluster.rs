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

use crate::types::v1alpha1::component::ClusterComponent;
use crate::types::v1alpha1::k8s;
use kube::{CustomResource, KubeSchema, ResourceExt};
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, KubeSchema, Default, PartialEq)]
#[kube(
    group = "dbaas.kubeblocks.io",
    version = "v1alpha1",
    kind = "Cluster",
    namespaced,
    status = "crate::types::v1alpha1::status::ClusterStatus",
    shortname = "cl",
    plural = "clusters",
    singular = "cluster",
    printcolumn = r#"{"name":"Definition", "type":"string", "jsonPath":".spec.clusterDefinitionRef"}"#,
    printcolumn = r#"{"name":"Version", "type":"string", "jsonPath":".spec.clusterVersionRef"}"#,
    printcolumn = r#"{"name":"Termination-Policy", "type":"string", "jsonPath":".spec.terminationPolicy"}"#,
    printcolumn = r#"{"name":"Phase", "type":"string", "jsonPath":".status.phase"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#,
    crates(serde_json = "k8s_openapi::serde_json")
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    #[x_kube(validation = Rule::new("self != ''").message("clusterDefinitionRef must be not empty"))]
    pub cluster_definition_ref: String,

    #[x_kube(validation = Rule::new("self != ''").message("clusterVersionRef must be not empty"))]
    pub cluster_version_ref: String,

    #[serde(default)]
    pub termination_policy: k8s::TerminationPolicy,

    #[x_kube(validation = Rule::new("self.size() > 0").message("components must be configured"))]
    pub components: Vec<ClusterComponent>,
}

impl Cluster {
    pub fn name(&self) -> String {
        ResourceExt::name_any(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use kube::CustomResourceExt;

    #[test]
    fn test_cluster_crd_metadata() {
        let crd = Cluster::crd();
        assert_eq!(crd.spec.group, "dbaas.kubeblocks.io");
        assert_eq!(crd.spec.names.kind, "Cluster");
        assert_eq!(crd.spec.scope, "Namespaced");
        assert_eq!(crd.spec.names.short_names, Some(vec!["cl".to_string()]));
    }

    #[test]
    fn test_cluster_from_fixture() {
        let cluster = crate::tests::create_test_cluster("mysql-def", "mysql-ver", "mysql");

        assert_eq!(cluster.name(), "mysql");
        assert_eq!(cluster.metadata.namespace.as_deref(), Some("default"));
        assert_eq!(cluster.spec.termination_policy, k8s::TerminationPolicy::WipeOut);
        assert_eq!(cluster.spec.components.len(), 2);
        assert_eq!(cluster.spec.components[1].name, "proxy");
    }
}
