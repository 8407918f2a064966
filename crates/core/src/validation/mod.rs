//! Registration validation engine.
//!
//! Provides the rule types, the declarative registration schema, a pure
//! evaluator, age computation, and the resolver that adapts the schema to the
//! form controller.

pub mod age;
pub mod evaluator;
pub mod resolver;
pub mod rules;
pub mod schema;
