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
use crate::validation::TemplateStore;
use crate::webhook::state::WebhookState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use kube::core::DynamicObject;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use tracing::{debug, error, info, warn};

fn invalid(message: String) -> (StatusCode, Json<AdmissionReview<DynamicObject>>) {
    error!(error = %message, "invalid admission review");
    (
        StatusCode::BAD_REQUEST,
        Json(AdmissionResponse::invalid(message).into_review()),
    )
}

/// Admits or denies a Cluster create or update.
///
/// A body that is not a review of a well-formed Cluster is answered with an
/// invalid review and HTTP 400.
pub async fn validate_cluster<S: TemplateStore + 'static>(
    State(state): State<WebhookState<S>>,
    body: Result<Json<AdmissionReview<Cluster>>, JsonRejection>,
) -> (StatusCode, Json<AdmissionReview<DynamicObject>>) {
    let review = match body {
        Ok(Json(review)) => review,
        Err(rejection) => {
            return invalid(format!("invalid AdmissionReview: {}", rejection.body_text()));
        }
    };

    let request: AdmissionRequest<Cluster> = match review.try_into() {
        Ok(request) => request,
        Err(e) => return invalid(format!("invalid AdmissionReview: {}", e)),
    };

    let uid = &request.uid;
    debug!(
        uid = %uid,
        operation = ?request.operation,
        namespace = ?request.namespace,
        name = %request.name,
        dry_run = request.dry_run,
        "processing admission request"
    );

    if request.operation == Operation::Delete {
        return (StatusCode::OK, Json(AdmissionResponse::from(&request).into_review()));
    }

    let Some(cluster) = request.object.as_ref() else {
        warn!(uid = %uid, "admission request without object");
        return (
            StatusCode::OK,
            Json(
                AdmissionResponse::from(&request)
                    .deny("admission request has no object")
                    .into_review(),
            ),
        );
    };

    let report = state
        .validator
        .validate(&request.operation, request.old_object.as_ref(), cluster)
        .await;
    let decision = report.decision();

    match decision.reason {
        Some(reason) => {
            warn!(
                uid = %uid,
                operation = ?request.operation,
                namespace = ?request.namespace,
                name = %cluster.name(),
                violations = report.violations.len(),
                reason = %reason,
                "admission request denied"
            );
            (
                StatusCode::OK,
                Json(AdmissionResponse::from(&request).deny(reason).into_review()),
            )
        }
        None => {
            info!(
                uid = %uid,
                operation = ?request.operation,
                namespace = ?request.namespace,
                name = %cluster.name(),
                "admission request allowed"
            );
            (StatusCode::OK, Json(AdmissionResponse::from(&request).into_review()))
        }
    }
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn ready_check() -> impl IntoResponse {
    (StatusCode::OK, "Ready")
}
