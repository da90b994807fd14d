// src/util/mod.rs
pub mod cancel;
pub mod testing;
