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

use crate::context::Context;
use crate::validation::{ClusterValidator, TemplateStore};
use crate::webhook::error::{BindSnafu, KubeClientSnafu, Result, ServeSnafu, TlsSnafu};
use crate::webhook::handlers::{health_check, ready_check, validate_cluster};
use crate::webhook::state::WebhookState;
use axum::{
    Router,
    routing::{get, post},
};
use axum_server::tls_rustls::RustlsConfig;
use snafu::ResultExt;
use snafu::futures::TryFutureExt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub const VALIDATE_CLUSTER_PATH: &str = "/validate-cluster";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

pub fn router<S: TemplateStore + 'static>(validator: Arc<ClusterValidator<S>>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/readyz", get(ready_check))
        .route(VALIDATE_CLUSTER_PATH, post(validate_cluster::<S>))
        .with_state(WebhookState::new(validator))
        .layer(TraceLayer::new_for_http())
}

/// Serves the webhook until the listener fails.
///
/// Uses TLS when both certificate files exist, plain HTTP otherwise.
pub async fn run(config: ServerConfig) -> Result<()> {
    let client = kube::Client::try_default()
        .context(KubeClientSnafu)
        .await?;
    let app = router(Arc::new(ClusterValidator::new(Context::new(client))));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    if exists(&config.cert_path).await && exists(&config.key_path).await {
        // Fails only when a provider is already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let tls = RustlsConfig::from_pem_file(&config.cert_path, &config.key_path)
            .context(TlsSnafu {
                cert: config.cert_path.clone(),
                key: config.key_path.clone(),
            })
            .await?;

        info!(%addr, path = VALIDATE_CLUSTER_PATH, "webhook server listening with TLS");
        axum_server::bind_rustls(addr, tls)
            .serve(app.into_make_service())
            .context(ServeSnafu)
            .await?;
    } else {
        warn!(
            cert = %config.cert_path.display(),
            key = %config.key_path.display(),
            "TLS certificate not found, serving plain HTTP"
        );

        let listener = tokio::net::TcpListener::bind(addr)
            .context(BindSnafu { addr })
            .await?;
        info!(%addr, path = VALIDATE_CLUSTER_PATH, "webhook server listening");
        axum::serve(listener, app).await.context(ServeSnafu)?;
    }

    Ok(())
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::tests::{MemoryTemplateStore, create_test_cluster, standard_store};
    use axum::body::Body;
    use http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn review(operation: &str, object: Value, old_object: Value) -> Value {
        json!({
            "apiVersion": "admission.k8s.io/v1",
            "kind": "AdmissionReview",
            "request": {
                "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
                "kind": {"group": "dbaas.kubeblocks.io", "version": "v1alpha1", "kind": "Cluster"},
                "resource": {"group": "dbaas.kubeblocks.io", "version": "v1alpha1", "resource": "clusters"},
                "name": "mysql",
                "namespace": "default",
                "operation": operation,
                "userInfo": {"username": "admin"},
                "object": object,
                "oldObject": old_object,
                "dryRun": false
            }
        })
    }

    async fn post_review(app: Router, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(VALIDATE_CLUSTER_PATH)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn app(store: MemoryTemplateStore) -> Router {
        router(Arc::new(ClusterValidator::new(store)))
    }

    fn cluster_json() -> Value {
        serde_json::to_value(create_test_cluster("mysql-def", "mysql-ver", "mysql")).unwrap()
    }

    #[tokio::test]
    async fn test_create_admitted() {
        let (status, body) =
            post_review(app(standard_store()), review("CREATE", cluster_json(), Value::Null)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["uid"], "705ab4f5-6393-11e8-b7cc-42010a800002");
        assert_eq!(body["response"]["allowed"], true);
    }

    #[tokio::test]
    async fn test_create_denied_with_reason() {
        let (status, body) = post_review(
            app(MemoryTemplateStore::default()),
            review("CREATE", cluster_json(), Value::Null),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["allowed"], false);
        let message = body["response"]["status"]["message"].as_str().unwrap();
        assert!(message.contains("not found"), "{}", message);
    }

    #[tokio::test]
    async fn test_update_denied_for_definition_change() {
        let old = cluster_json();
        let mut new = old.clone();
        new["spec"]["clusterDefinitionRef"] = json!("mysql-def-2");
        let store = standard_store().with_cluster_version(crate::tests::create_test_cluster_version(
            "mysql-def-2",
            "mysql-ver-2",
        ));
        new["spec"]["clusterVersionRef"] = json!("mysql-ver-2");

        let (_, body) = post_review(app(store), review("UPDATE", new, old)).await;

        assert_eq!(body["response"]["allowed"], false);
        assert!(
            body["response"]["status"]["message"]
                .as_str()
                .unwrap()
                .contains("spec.clusterDefinitionRef")
        );
    }

    #[tokio::test]
    async fn test_delete_bypasses_validation() {
        let (status, body) = post_review(
            app(MemoryTemplateStore::default()),
            review("DELETE", Value::Null, cluster_json()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"]["allowed"], true);
    }

    #[tokio::test]
    async fn test_review_without_request_is_invalid() {
        let body = json!({
            "apiVersion": "admission.k8s.io/v1",
            "kind": "AdmissionReview"
        });

        let (status, body) = post_review(app(standard_store()), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["response"]["allowed"], false);
    }

    #[tokio::test]
    async fn test_undecodable_object_is_invalid() {
        let mut object = cluster_json();
        object["spec"]["components"][0]["replicas"] = json!("three");

        let (status, body) =
            post_review(app(standard_store()), review("CREATE", object, Value::Null)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "AdmissionReview");
        assert_eq!(body["response"]["allowed"], false);
        assert!(
            body["response"]["status"]["message"]
                .as_str()
                .unwrap()
                .starts_with("invalid AdmissionReview")
        );
    }

    #[tokio::test]
    async fn test_update_unknown_type_reason() {
        let old = cluster_json();
        let mut new = old.clone();
        new["spec"]["components"][0]["type"] = json!("replicaset");

        let (_, body) = post_review(app(standard_store()), review("UPDATE", new, old)).await;

        assert_eq!(body["response"]["allowed"], false);
        assert!(
            body["response"]["status"]["message"]
                .as_str()
                .unwrap()
                .contains("is not found in ClusterDefinition.spec.components[*].typeName")
        );
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        for uri in ["/healthz", "/readyz"] {
            let response = app(standard_store())
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }
}
