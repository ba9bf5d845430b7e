// blazestd - core/mod.rs
//
// Runtime helpers called by compiled Blaze programs: formatting,
// console I/O, and record passing.
// Must NOT depend on: app.

pub mod console;
pub mod format;
pub mod record;
