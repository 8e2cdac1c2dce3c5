//! Synthetic data generators for vigil-eval benchmarks.
//!
//! Generates rules documents and record payloads from fixed pools with a
//! seeded RNG for reproducibility.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

/// Fixed seed for reproducible benchmarks.
const SEED: u64 = 0xF1E7_D00D_2024;

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

const FIELD_NAMES: &[&str] = &[
    "battery_level",
    "speed",
    "temperature",
    "payload_mass",
    "motor_current",
    "signal_strength",
    "error_count",
    "uptime_seconds",
];

const STATES: &[&str] = &["idle", "moving", "stopped", "charging", "error", "docked"];

/// Generate a rules document with `n` simple threshold rules.
pub fn gen_n_rules(n: usize) -> String {
    let mut rng = rng();
    let mut rules = Vec::with_capacity(n);
    for i in 0..n {
        let field = FIELD_NAMES[rng.gen_range(0..FIELD_NAMES.len())];
        let operator = if rng.gen_bool(0.5) { ">=" } else { "<=" };
        rules.push(json!({
            "id": format!("rule_{i:05}"),
            "field": field,
            "operator": operator,
            "threshold": rng.gen_range(0..100),
            "severity": "warning",
            "message": format!("{field} out of range")
        }));
    }
    json!({ "rules": rules }).to_string()
}

/// Generate a rules document with `n` conditional rules.
pub fn gen_n_conditional_rules(n: usize) -> String {
    let mut rng = rng();
    let mut rules = Vec::with_capacity(n);
    for i in 0..n {
        let field = FIELD_NAMES[rng.gen_range(0..FIELD_NAMES.len())];
        rules.push(json!({
            "id": format!("cond_{i:05}"),
            "type": "conditional",
            "severity": "error",
            "message": "conditional check failed",
            "condition": {"field": field, "operator": "<", "value": rng.gen_range(10..50)},
            "then": {"field": "state", "operator": "in", "value": ["idle", "stopped"]}
        }));
    }
    json!({ "rules": rules }).to_string()
}

/// Generate `n` record payloads with randomized telemetry values.
pub fn gen_record_values(n: usize) -> Vec<Value> {
    let mut rng = rng();
    (0..n)
        .map(|i| {
            let mut payload = json!({
                "timestamp": format!("2024-01-15T08:{:02}:{:02}Z", (i / 60) % 60, i % 60),
                "entity_id": format!("unit-{}", rng.gen_range(0..16)),
                "state": STATES[rng.gen_range(0..STATES.len())],
            });
            let map = payload.as_object_mut().unwrap();
            for field in FIELD_NAMES {
                map.insert((*field).to_string(), json!(rng.gen_range(0..150)));
            }
            payload
        })
        .collect()
}
