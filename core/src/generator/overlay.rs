//! # User-Data Actor Overlay
//!
//! Higher-order operation that reruns a delegate generator operation and
//! merges a chosen actor's credentials/attribute values into each resulting
//! descriptor (spec.md §4.3 final paragraph, §6). The Python source's
//! `populate_user_data` helper this mirrors was not present in the
//! retrieval pack, so the merge rule below is reconstructed directly from
//! spec.md's description: "the chosen actor's credentials and attribute
//! values are merged into each descriptor."

use crate::descriptor::TestDescriptor;
use crate::model::NormalizedSpec;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// `{ actors: [ { actor1: { ... } }, { actor2: { ... } } ] }`, per spec.md §6.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserData {
    /// `actors[0]` carries key `actor1`; `actors[1]` carries key `actor2`.
    pub actors: Vec<Map<String, JsonValue>>,
}

fn actor_attributes(user_data: &UserData, index: usize, key: &str) -> Map<String, JsonValue> {
    user_data
        .actors
        .get(index)
        .and_then(|entry| entry.get(key))
        .and_then(JsonValue::as_object)
        .cloned()
        .unwrap_or_default()
}

fn overlay_one(mut descriptor: TestDescriptor, attributes: &Map<String, JsonValue>) -> TestDescriptor {
    if let Some(header_overrides) = attributes.get("headers").and_then(JsonValue::as_object) {
        let mut headers: IndexMap<String, String> = descriptor.options.headers.unwrap_or_default();
        for (name, value) in header_overrides {
            if let Some(s) = value.as_str() {
                headers.insert(name.clone(), s.to_string());
            }
        }
        descriptor.options.headers = Some(headers);
    }

    for param in descriptor
        .body_params
        .iter_mut()
        .chain(descriptor.query_params.iter_mut())
        .chain(descriptor.path_params.iter_mut())
    {
        if let Some(value) = attributes.get(&param.name) {
            param.value = Some(value.clone());
        }
    }

    descriptor
}

/// Runs `delegate` over `spec`, then returns overlaid copies for each
/// requested actor. Neither flag set yields an empty result; both set
/// yields `actor1`-overlaid copies followed by `actor2`-overlaid copies.
pub fn with_actor(
    spec: &NormalizedSpec,
    user_data: &UserData,
    delegate: impl Fn(&NormalizedSpec) -> Vec<TestDescriptor>,
    test_for_actor1: bool,
    test_for_actor2: bool,
) -> Vec<TestDescriptor> {
    let base_tests = delegate(spec);
    let mut overlaid = Vec::new();

    if test_for_actor1 {
        let attrs = actor_attributes(user_data, 0, "actor1");
        overlaid.extend(base_tests.iter().cloned().map(|d| overlay_one(d, &attrs)));
    }
    if test_for_actor2 {
        let attrs = actor_attributes(user_data, 1, "actor2");
        overlaid.extend(base_tests.iter().cloned().map(|d| overlay_one(d, &attrs)));
    }

    overlaid
}
