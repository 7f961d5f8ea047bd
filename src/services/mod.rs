// src/services/mod.rs
pub mod client;
pub mod widget;
