//! Illustrative, non-core grammars built on top of the public API. Kept in
//! the library (rather than only in `demos/`) so both the runnable example
//! and the integration tests can share one grammar-building function.
pub mod graph;
