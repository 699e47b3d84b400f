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

use crate::types::v1alpha1::cluster::Cluster;
use crate::types::v1alpha1::cluster_definition::ClusterDefinition;
use crate::types::v1alpha1::cluster_version::ClusterVersion;
use crate::types::v1alpha1::persistence::{STORAGE_RESOURCE, VolumeClaimTemplate};
use crate::validation::TemplateStore;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use snafu::Snafu;
use std::collections::BTreeMap;
use std::convert::Infallible;

// Fixtures are written as manifests so they read like what users apply.
fn from_yaml<T: serde::de::DeserializeOwned>(yaml: &str) -> T {
    match serde_yaml_ng::from_str(yaml) {
        Ok(object) => object,
        Err(e) => panic!("invalid fixture: {e}\n{yaml}"),
    }
}

pub fn create_test_cluster(cluster_definition: &str, cluster_version: &str, name: &str) -> Cluster {
    from_yaml(&format!(
        r#"
apiVersion: dbaas.kubeblocks.io/v1alpha1
kind: Cluster
metadata:
  name: {name}
  namespace: default
spec:
  clusterDefinitionRef: {cluster_definition}
  clusterVersionRef: {cluster_version}
  terminationPolicy: WipeOut
  components:
  - name: replicasets
    type: replicasets
    replicas: 1
    volumeClaimTemplates:
    - name: data
      spec:
        accessModes:
        - ReadWriteOnce
        resources:
          requests:
            storage: 1Gi
  - name: proxy
    type: proxy
    replicas: 1
"#
    ))
}

pub fn create_test_replication_cluster(
    cluster_definition: &str,
    cluster_version: &str,
    name: &str,
) -> Cluster {
    from_yaml(&format!(
        r#"
apiVersion: dbaas.kubeblocks.io/v1alpha1
kind: Cluster
metadata:
  name: {name}
  namespace: default
spec:
  clusterDefinitionRef: {cluster_definition}
  clusterVersionRef: {cluster_version}
  components:
  - name: replication
    type: replication
    monitor: false
    primaryIndex: 0
    replicas: 2
    volumeClaimTemplates:
    - name: data
      spec:
        accessModes:
        - ReadWriteOnce
        resources:
          requests:
            storage: 1Gi
"#
    ))
}

pub fn create_test_cluster_definition(name: &str) -> ClusterDefinition {
    from_yaml(&format!(
        r#"
apiVersion: dbaas.kubeblocks.io/v1alpha1
kind: ClusterDefinition
metadata:
  name: {name}
spec:
  type: state.mysql
  components:
  - typeName: replicasets
    componentType: Stateful
    defaultReplicas: 1
    characterType: mysql
  - typeName: proxy
    componentType: Stateless
    defaultReplicas: 1
"#
    ))
}

pub fn create_test_replication_cluster_definition(name: &str) -> ClusterDefinition {
    from_yaml(&format!(
        r#"
apiVersion: dbaas.kubeblocks.io/v1alpha1
kind: ClusterDefinition
metadata:
  name: {name}
spec:
  type: state.redis
  components:
  - typeName: replication
    componentType: Replication
    defaultReplicas: 2
    characterType: redis
"#
    ))
}

pub fn create_test_cluster_version(cluster_definition: &str, name: &str) -> ClusterVersion {
    from_yaml(&format!(
        r#"
apiVersion: dbaas.kubeblocks.io/v1alpha1
kind: ClusterVersion
metadata:
  name: {name}
spec:
  clusterDefinitionRef: {cluster_definition}
  components:
  - type: replicasets
    containers:
    - name: mysql
      image: mysql:8.0
  - type: proxy
    containers:
    - name: proxy
      image: envoyproxy/envoy:v1.30.0
"#
    ))
}

pub fn create_test_replication_cluster_version(
    cluster_definition: &str,
    name: &str,
) -> ClusterVersion {
    from_yaml(&format!(
        r#"
apiVersion: dbaas.kubeblocks.io/v1alpha1
kind: ClusterVersion
metadata:
  name: {name}
spec:
  clusterDefinitionRef: {cluster_definition}
  components:
  - type: replication
    containers:
    - name: redis
      image: redis:7.0
"#
    ))
}

/// Sets the requested storage of a claim template that already declares one.
pub fn set_storage_size(template: &mut VolumeClaimTemplate, size: &str) {
    let requests = template
        .spec
        .as_mut()
        .and_then(|spec| spec.resources.as_mut())
        .and_then(|resources| resources.requests.as_mut());
    match requests {
        Some(requests) => {
            requests.insert(STORAGE_RESOURCE.to_string(), Quantity(size.to_string()));
        }
        None => panic!("template {} has no resource requests", template.name),
    }
}

/// Template store backed by in-memory maps.
#[derive(Default, Clone)]
pub struct MemoryTemplateStore {
    definitions: BTreeMap<String, ClusterDefinition>,
    versions: BTreeMap<String, ClusterVersion>,
}

impl MemoryTemplateStore {
    pub fn with_cluster_definition(mut self, definition: ClusterDefinition) -> Self {
        let name = definition.metadata.name.clone().unwrap_or_default();
        self.definitions.insert(name, definition);
        self
    }

    pub fn with_cluster_version(mut self, version: ClusterVersion) -> Self {
        let name = version.metadata.name.clone().unwrap_or_default();
        self.versions.insert(name, version);
        self
    }
}

impl TemplateStore for MemoryTemplateStore {
    type Error = Infallible;

    async fn get_cluster_definition(
        &self,
        name: &str,
    ) -> Result<Option<ClusterDefinition>, Infallible> {
        Ok(self.definitions.get(name).cloned())
    }

    async fn get_cluster_version(&self, name: &str) -> Result<Option<ClusterVersion>, Infallible> {
        Ok(self.versions.get(name).cloned())
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("connection refused"))]
pub struct Unavailable;

/// Template store whose every lookup fails.
pub struct FailingTemplateStore;

impl TemplateStore for FailingTemplateStore {
    type Error = Unavailable;

    async fn get_cluster_definition(
        &self,
        _name: &str,
    ) -> Result<Option<ClusterDefinition>, Unavailable> {
        UnavailableSnafu.fail()
    }

    async fn get_cluster_version(&self, _name: &str) -> Result<Option<ClusterVersion>, Unavailable> {
        UnavailableSnafu.fail()
    }
}

/// `mysql-def` and `mysql-def-2` definitions with `mysql-ver` bound to `mysql-def`.
pub fn standard_store() -> MemoryTemplateStore {
    MemoryTemplateStore::default()
        .with_cluster_definition(create_test_cluster_definition("mysql-def"))
        .with_cluster_definition(create_test_cluster_definition("mysql-def-2"))
        .with_cluster_version(create_test_cluster_version("mysql-def", "mysql-ver"))
}

/// `rs-def` replication definition with `rs-ver` bound to it.
pub fn replication_store() -> MemoryTemplateStore {
    MemoryTemplateStore::default()
        .with_cluster_definition(create_test_replication_cluster_definition("rs-def"))
        .with_cluster_version(create_test_replication_cluster_version("rs-def", "rs-ver"))
}
