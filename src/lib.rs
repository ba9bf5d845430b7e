// blazestd - lib.rs
//
// Library entry point: runtime helpers for compiled Blaze programs and the
// launcher logic used by the `blazevm` binary.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
