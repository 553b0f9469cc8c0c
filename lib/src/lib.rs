//! SHACL property path engine.
//!
//! This crate decodes the graph encoding of SHACL property paths into a
//! [`ShaclPropertyPath`] tree and offers three consumers of that tree,
//! all built on the same [`PathVisitor`] double dispatch:
//!
//! * [`find_nodes`] walks a fact store and returns the nodes reachable
//!   from a set of start nodes over the path,
//! * [`to_sparql`] renders the path in SPARQL property path syntax,
//! * [`to_algebra`] compiles the path to an operator tree (and
//!   [`to_property_path_expression`] hands it to spargebra).
//!
//! Graph access goes through the [`FactStore`] trait, implemented here
//! for [`oxigraph::model::Graph`].
#![deny(clippy::all)]

// Publicly visible items
pub mod error;
pub mod find_nodes;
pub mod path;
pub mod store;
pub mod to_algebra;
pub mod to_sparql;
pub mod visitor;

// Internal modules.
pub(crate) mod named_nodes;
pub mod test_utils; // Often pub for integration tests

pub use crate::error::PathError;
pub use crate::find_nodes::{find_nodes, find_nodes_from};
pub use crate::path::{NegatedProperty, PathOptions, ShaclPropertyPath};
pub use crate::store::FactStore;
pub use crate::to_algebra::{
    to_algebra, to_algebra_from, to_property_path_expression, PathAlgebra, PathExpression,
    PathOperator,
};
pub use crate::to_sparql::{to_sparql, to_sparql_from, to_sparql_sequence};
pub use crate::visitor::PathVisitor;
