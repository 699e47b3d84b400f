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
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::KubeSchema;
use serde::{Deserialize, Serialize};

/// Resource name of the storage size entry in a claim's requests.
pub const STORAGE_RESOURCE: &str = "storage";

#[derive(Deserialize, Serialize, Clone, Debug, KubeSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeClaimTemplate {
    /// Must match a volume name declared by the component's workload.
    #[x_kube(validation = Rule::new("self != ''").message("volumeClaimTemplates name must be not empty"))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<corev1::PersistentVolumeClaimSpec>,
}

impl VolumeClaimTemplate {
    /// Requested storage size, if the claim declares one.
    pub fn storage_size(&self) -> Option<&Quantity> {
        self.spec
            .as_ref()?
            .resources
            .as_ref()?
            .requests
            .as_ref()?
            .get(STORAGE_RESOURCE)
    }

    /// The claim with its requested storage size removed.
    ///
    /// Two templates whose stripped forms are equal differ at most in storage size.
    pub fn without_storage_size(&self) -> VolumeClaimTemplate {
        let mut stripped = self.clone();
        if let Some(resources) = stripped.spec.as_mut().and_then(|s| s.resources.as_mut())
            && let Some(requests) = resources.requests.as_mut()
        {
            requests.remove(STORAGE_RESOURCE);
            if requests.is_empty() {
                resources.requests = None;
            }
        }
        stripped
    }
}
