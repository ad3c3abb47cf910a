//! # Voxel World Entry Point
//!
//! This is the main entry point for the headless world session. It simply calls into the
//! library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

use log::error;

fn main() {
    if let Err(err) = voxel_world::run() {
        error!("{}", err);
        eprintln!("voxel-world: {}", err);
        std::process::exit(1);
    }
}
