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

use crate::validation::ClusterValidator;
use std::sync::Arc;

/// Shared state of the webhook router.
pub struct WebhookState<S> {
    pub validator: Arc<ClusterValidator<S>>,
}

impl<S> WebhookState<S> {
    pub fn new(validator: Arc<ClusterValidator<S>>) -> Self {
        Self { validator }
    }
}

// Derived Clone would require `S: Clone`.
impl<S> Clone for WebhookState<S> {
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
        }
    }
}
