// src/mc/mod.rs
pub mod finite_diff;
pub mod malliavin;
pub mod mc_engine;
