//! # Parameter Fuzzer
//!
//! Fills each declared `ParameterRecord` with a type-appropriate synthetic
//! value (spec.md §4.2). Pure apart from its random source.

use crate::model::{ParamType, ParameterRecord};
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use serde_json::{json, Value as JsonValue};

const FUZZ_STRING_LEN: usize = 8;

fn fuzz_value(param_type: &ParamType) -> JsonValue {
    let mut rng = thread_rng();
    match param_type {
        ParamType::String | ParamType::Unknown => {
            let s: String = (&mut rng)
                .sample_iter(Alphanumeric)
                .take(FUZZ_STRING_LEN)
                .map(char::from)
                .collect();
            json!(s)
        }
        ParamType::Integer => json!(rng.gen_range(1..1000)),
        ParamType::Number => json!(rng.gen_range(1.0..1000.0)),
        ParamType::Boolean => json!(rng.gen_bool(0.5)),
        ParamType::Array(item_type) => json!([fuzz_value(item_type)]),
        ParamType::Object(properties) => {
            let mut map = serde_json::Map::new();
            for (name, ty) in properties {
                map.insert(name.clone(), fuzz_value(ty));
            }
            JsonValue::Object(map)
        }
    }
}

/// Fills `value` on every record with a type-appropriate synthetic datum.
/// `is_v3` is accepted for signature parity with the source implementation;
/// by the time a record reaches the fuzzer, its `ParamType` has already been
/// resolved dialect-independently by the normalizer.
pub fn fuzz_params(params: &[ParameterRecord], _is_v3: bool) -> Vec<ParameterRecord> {
    params
        .iter()
        .cloned()
        .map(|mut p| {
            p.value = Some(fuzz_value(&p.param_type));
            p
        })
        .collect()
}

/// A small random non-negative integer, used by the BOLA trailing-slash
/// operation to probe an adjacent object id.
pub fn generate_random_int() -> i64 {
    thread_rng().gen_range(1..100_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParamLocation;

    #[test]
    fn fuzzes_every_record() {
        let params = vec![
            ParameterRecord::new("q", ParamLocation::Query, ParamType::String),
            ParameterRecord::new("n", ParamLocation::Query, ParamType::Integer),
        ];
        let fuzzed = fuzz_params(&params, true);
        assert!(fuzzed.iter().all(|p| p.value.is_some()));
    }

    #[test]
    fn fuzzes_array_of_integers() {
        let param = ParameterRecord::new(
            "ids",
            ParamLocation::Query,
            ParamType::Array(Box::new(ParamType::Integer)),
        );
        let fuzzed = fuzz_params(std::slice::from_ref(&param), true);
        let value = fuzzed[0].value.as_ref().unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn fuzzes_object_properties() {
        let param = ParameterRecord::new(
            "user",
            ParamLocation::Body,
            ParamType::Object(vec![("admin".into(), ParamType::Boolean)]),
        );
        let fuzzed = fuzz_params(std::slice::from_ref(&param), true);
        let value = fuzzed[0].value.as_ref().unwrap();
        assert!(value.get("admin").is_some());
    }

    #[test]
    fn unknown_type_fuzzes_to_string() {
        let param = ParameterRecord::new("x", ParamLocation::Query, ParamType::Unknown);
        let fuzzed = fuzz_params(std::slice::from_ref(&param), false);
        assert!(fuzzed[0].value.as_ref().unwrap().is_string());
    }
}
