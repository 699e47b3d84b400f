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

use crate::utils::quantity::ExactQuantity;
use crate::validation::Violation;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use std::collections::BTreeMap;

pub const CPU: &str = "cpu";
pub const MEMORY: &str = "memory";
pub const HUGEPAGES_PREFIX: &str = "hugepages-";

/// Resource names a component may request or limit.
pub fn is_supported_key(key: &str) -> bool {
    key == CPU || key == MEMORY || key.starts_with(HUGEPAGES_PREFIX)
}

/// Checks one component's request and limit maps.
///
/// Unsupported keys and unparsable values are reported per entry. Keys
/// present in both maps must satisfy request <= limit.
pub fn validate_resources(
    component: &str,
    requests: Option<&BTreeMap<String, Quantity>>,
    limits: Option<&BTreeMap<String, Quantity>>,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let requests = parse_list(component, "requests", requests, &mut violations);
    let limits = parse_list(component, "limits", limits, &mut violations);

    for (key, (request, raw_request)) in &requests {
        let Some((limit, raw_limit)) = limits.get(key) else {
            continue;
        };
        if request > limit {
            violations.push(Violation::ResourceRange {
                component: component.to_string(),
                key: (*key).to_string(),
                request: raw_request.to_string(),
                limit: raw_limit.to_string(),
            });
        }
    }

    violations
}

fn parse_list<'a>(
    component: &str,
    field: &'static str,
    list: Option<&'a BTreeMap<String, Quantity>>,
    violations: &mut Vec<Violation>,
) -> BTreeMap<&'a str, (ExactQuantity, &'a str)> {
    let mut parsed = BTreeMap::new();
    for (key, quantity) in list.into_iter().flatten() {
        if !is_supported_key(key) {
            violations.push(Violation::ResourceKey {
                component: component.to_string(),
                field,
                key: key.clone(),
            });
            continue;
        }
        match ExactQuantity::try_from(quantity) {
            Ok(value) => {
                parsed.insert(key.as_str(), (value, quantity.0.as_str()));
            }
            Err(error) => violations.push(Violation::InvalidQuantity {
                component: component.to_string(),
                field,
                key: key.clone(),
                value: quantity.0.clone(),
                message: error.to_string(),
            }),
        }
    }
    parsed
}
