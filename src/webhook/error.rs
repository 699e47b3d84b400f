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

use snafu::Snafu;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("failed to create Kubernetes client: {}", source))]
    KubeClient { source: kube::Error },

    #[snafu(display(
        "failed to load TLS certificate '{}' and key '{}': {}",
        cert.display(),
        key.display(),
        source
    ))]
    Tls {
        cert: PathBuf,
        key: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to bind {}: {}", addr, source))]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[snafu(display("webhook server error: {}", source))]
    Serve { source: std::io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
