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

//! Common enum types shared by the cluster resources

use k8s_openapi::schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::Display;

/// What happens to a Cluster's workloads and data when the Cluster is deleted.
/// - DoNotTerminate: deletion is blocked
/// - Halt: workloads are removed, volumes are kept
/// - Delete: workloads and volumes are removed, backups are kept
/// - WipeOut: everything, including backups, is removed
#[derive(Default, Deserialize, Serialize, Clone, Copy, Debug, JsonSchema, Display, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
#[schemars(rename_all = "PascalCase")]
pub enum TerminationPolicy {
    #[strum(to_string = "DoNotTerminate")]
    DoNotTerminate,

    #[strum(to_string = "Halt")]
    Halt,

    #[strum(to_string = "Delete")]
    #[default]
    Delete,

    #[strum(to_string = "WipeOut")]
    WipeOut,
}

/// Topology class of a component template.
///
/// The class decides which extra semantic rules apply to components of that
/// type, see `validation::topology`.
#[derive(
    Default,
    Deserialize,
    Serialize,
    Clone,
    Copy,
    Debug,
    JsonSchema,
    Display,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(rename_all = "PascalCase")]
#[schemars(rename_all = "PascalCase")]
pub enum ComponentType {
    #[strum(to_string = "Stateless")]
    Stateless,

    #[strum(to_string = "Stateful")]
    #[default]
    Stateful,

    /// Members elect a leader through a consensus protocol.
    #[strum(to_string = "Consensus")]
    Consensus,

    /// One primary and a set of read replicas selected by `primaryIndex`.
    #[strum(to_string = "Replication")]
    Replication,
}
