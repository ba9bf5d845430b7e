// blazestd - app/mod.rs
//
// Application layer: the BlazeVM launcher.
// Depends on platform and util; the binary in main.rs drives it.

pub mod vm;
