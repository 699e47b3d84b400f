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
use crate::webhook::ServerConfig;
use kube::CustomResourceExt;
use std::pin::Pin;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing_subscriber::EnvFilter;

mod context;
pub mod types;
pub mod utils;
pub mod validation;
pub mod webhook;

#[cfg(test)]
mod tests;

pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    webhook::run(config).await?;

    Ok(())
}

/// Renders the CRDs of every resource this webhook validates or reads.
pub fn crd_yaml() -> Result<String, types::error::Error> {
    let documents = [
        serde_yaml_ng::to_string(&ClusterDefinition::crd())?,
        serde_yaml_ng::to_string(&ClusterVersion::crd())?,
        serde_yaml_ng::to_string(&Cluster::crd())?,
    ];
    Ok(documents.join("---\n"))
}

pub async fn crd(file: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer: Pin<Box<dyn AsyncWrite + Send>> = if let Some(file) = file {
        Box::pin(
            tokio::fs::OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(file)
                .await?,
        )
    } else {
        Box::pin(tokio::io::stdout())
    };

    writer.write_all(crd_yaml()?.as_bytes()).await?;
    writer.flush().await?;

    Ok(())
}
