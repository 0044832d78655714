//! Voltchat Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Voltchat
//! response pipeline. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Vector primitives, strokes, labels and render layers ([`draw`] module)
//! - **Semantic**: The circuit diagram model ([`semantic`] module)
//! - **Shape**: The symbol library and terminal tables for every component kind ([`shape`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod semantic;
pub mod shape;
