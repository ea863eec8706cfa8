#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn reports_version() {
    assert!(!toast_pet_engine::version().is_empty());
}

#[wasm_bindgen_test]
fn pet_needs_its_markup() {
    // A blank test page has no #toast-pet node
    assert!(toast_pet_engine::Pet::new().is_err());
}
