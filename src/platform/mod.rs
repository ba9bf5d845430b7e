// blazestd - platform/mod.rs
//
// Platform abstraction layer: filesystem helpers, OS name detection,
// config directory resolution.
// Dependencies: standard library, directories crate.
// Must NOT depend on: core, app.

pub mod config;
pub mod fs;
pub mod os;
