//! # Voxel City Entry Point
//!
//! Calls into the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- city.json
//! ```

fn main() {
    voxel_city::run();
}
