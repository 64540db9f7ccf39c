// This binary crate is intentionally minimal.
// All simulator logic lives in the library (src/lib.rs and its modules).
// Run the demo with:
//   cargo run --example overfit
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("ferrite-neurons: a layered neuron graph simulator in Rust.");
    log::info!("Run `cargo run --example overfit` to train a 3x3 -> 3x3 -> 2x2 network.");
}
