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

use crate::types::v1alpha1::cluster::ClusterSpec;
use crate::types::v1alpha1::cluster_definition::ClusterDefinition;
use crate::types::v1alpha1::cluster_version::ClusterVersion;
use crate::validation::Violation;
use std::future::Future;

const CLUSTER_DEFINITION_KIND: &str = "clusterdefinitions";
const CLUSTER_VERSION_KIND: &str = "clusterversions";

/// Read access to the cluster-scoped templates a Cluster refers to.
///
/// `Ok(None)` means the object does not exist; `Err` is a failed lookup.
pub trait TemplateStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get_cluster_definition(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<ClusterDefinition>, Self::Error>> + Send;

    fn get_cluster_version(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<ClusterVersion>, Self::Error>> + Send;
}

/// Templates backing one Cluster, resolved for a single request.
///
/// The ClusterVersion is only checked for existence and its binding, so it is
/// not carried further.
#[derive(Debug, Clone)]
pub struct ResolvedTemplates {
    pub definition: ClusterDefinition,
}

/// Fetches both templates named by `spec`.
///
/// Both lookups run concurrently, the definition is reported first when both fail.
pub async fn resolve<S: TemplateStore>(
    store: &S,
    spec: &ClusterSpec,
) -> Result<ResolvedTemplates, Violation> {
    let definition_ref = spec.cluster_definition_ref.as_str();
    let version_ref = spec.cluster_version_ref.as_str();

    let (definition, version) = futures::join!(
        lookup(CLUSTER_DEFINITION_KIND, definition_ref, |name| store
            .get_cluster_definition(name)),
        lookup(CLUSTER_VERSION_KIND, version_ref, |name| store
            .get_cluster_version(name)),
    );
    let definition = definition?;
    let version = version?;

    if version.spec.cluster_definition_ref != definition_ref {
        return Err(Violation::ReferenceMismatch {
            version: version_ref.to_string(),
            expected: definition_ref.to_string(),
            actual: version.spec.cluster_definition_ref,
        });
    }

    Ok(ResolvedTemplates { definition })
}

async fn lookup<'a, T, E, F, Fut>(kind: &'static str, name: &'a str, get: F) -> Result<T, Violation>
where
    E: std::error::Error,
    F: FnOnce(&'a str) -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    if name.is_empty() {
        return Err(Violation::ReferenceNotFound {
            kind,
            name: String::new(),
        });
    }

    match get(name).await {
        Ok(Some(object)) => Ok(object),
        Ok(None) => Err(Violation::ReferenceNotFound {
            kind,
            name: name.to_string(),
        }),
        Err(error) => Err(Violation::ReferenceLookup {
            kind,
            name: name.to_string(),
            message: error.to_string(),
        }),
    }
}
