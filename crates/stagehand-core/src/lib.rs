//! Stagehand Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Stagehand layout
//! engine and its consumers:
//!
//! - **Identifiers**: String-interned element ids ([`identifier::Id`])
//! - **Geometry**: Points, sizes, bounds and segments ([`geometry`] module)
//! - **Shapes**: The closed shape-kind table with anchor semantics ([`shape`] module)
//! - **Options**: Authored layout options ([`options`] module)
//! - **Model**: The diagram description itself ([`model`] module)

pub mod geometry;
pub mod identifier;
pub mod model;
pub mod options;
pub mod shape;
