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
use crate::types::v1alpha1::cluster_version::ClusterVersion;
use crate::validation::TemplateStore;
use k8s_openapi::ClusterResourceScope;
use kube::{Resource, api::Api};
use serde::de::DeserializeOwned;
use snafu::Snafu;
use snafu::futures::TryFutureExt;
use std::fmt::Debug;
use tracing::debug;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Kubernetes API error: {}", source))]
    Kube { source: kube::Error },
}

/// Kubernetes API access shared by all admission requests.
#[derive(Clone)]
pub struct Context {
    pub(crate) client: kube::Client,
}

impl Context {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    /// Fetches a cluster-scoped object, `None` when it does not exist.
    pub async fn get_cluster_scoped<T>(&self, name: &str) -> Result<Option<T>, Error>
    where
        T: Clone + DeserializeOwned + Debug + Resource<Scope = ClusterResourceScope>,
        <T as kube::Resource>::DynamicType: Default,
    {
        let api: Api<T> = Api::all(self.client.clone());
        let object = api.get_opt(name).context(KubeSnafu).await?;
        debug!(
            kind = %T::kind(&Default::default()),
            name,
            found = object.is_some(),
            "template lookup"
        );
        Ok(object)
    }
}

impl TemplateStore for Context {
    type Error = Error;

    async fn get_cluster_definition(&self, name: &str) -> Result<Option<ClusterDefinition>, Error> {
        self.get_cluster_scoped(name).await
    }

    async fn get_cluster_version(&self, name: &str) -> Result<Option<ClusterVersion>, Error> {
        self.get_cluster_scoped(name).await
    }
}
