use wasm_bindgen::prelude::*;

use crate::lifecycle::LifecycleEngine;
use crate::state::{InstanceState, code_from_f64};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = JSON)]
    fn parse(s: &str) -> JsValue;
}

fn to_js(value: &serde_json::Value) -> JsValue {
    match serde_json::to_string(value) {
        Ok(json_str) => parse(&json_str),
        Err(_) => JsValue::NULL,
    }
}

fn state_json(state: InstanceState) -> serde_json::Value {
    serde_json::json!({
        "state": format!("{state:?}"),
        "literal": state.literal(),
        "code": state.code(),
        "class": state.class().as_ref(),
        "successors": LifecycleEngine::successors(state)
            .iter()
            .map(|s| s.literal())
            .collect::<Vec<_>>(),
    })
}

/// Resolve a state literal (case-insensitive).
#[wasm_bindgen]
pub fn parse_instance_state(literal: Option<String>) -> JsValue {
    match InstanceState::parse(literal.as_deref()) {
        Ok(state) => to_js(&state_json(state)),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Resolve a numeric EC2 state code; the high byte is ignored.
#[wasm_bindgen]
pub fn instance_state_from_code(code: f64) -> JsValue {
    match code_from_f64(code).and_then(InstanceState::from_code) {
        Ok(state) => to_js(&state_json(state)),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Returns every state with its literal, code, class and successors.
#[wasm_bindgen]
pub fn get_all_states() -> JsValue {
    let result: Vec<serde_json::Value> = InstanceState::ALL.into_iter().map(state_json).collect();
    to_js(&serde_json::Value::Array(result))
}

/// Decide whether an observed state should replace the current one.
#[wasm_bindgen]
pub fn decide_transition(current: Option<String>, observed: &str) -> String {
    let current = match current.as_deref().map(InstanceState::from_literal) {
        Some(Ok(state)) => Some(state),
        Some(Err(e)) => return format!("Error: {e}"),
        None => None,
    };
    let observed = match InstanceState::from_literal(observed) {
        Ok(state) => state,
        Err(e) => return format!("Error: {e}"),
    };
    LifecycleEngine::decide_transition(current, observed).to_string()
}

/// Check if a state literal names the terminal state.
#[wasm_bindgen]
pub fn is_terminal(literal: Option<String>) -> bool {
    InstanceState::parse(literal.as_deref()).is_ok_and(InstanceState::is_terminal)
}

fn error_result(msg: &str) -> JsValue {
    let obj = serde_json::json!({"error": msg});
    to_js(&obj)
}
