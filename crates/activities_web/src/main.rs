// Trunk builds this binary; `index.html` links it as the app entry.
//
// Outside wasm32 with `--features web` there is nothing to run.

fn main() {}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    activities_web::start();
}
