//! Role-based access policy
//!
//! A [`PolicyTable`] is built once from casbin-style CSV lines and never
//! mutated afterwards; every decision is a pure lookup.

mod matcher;
mod table;

pub use matcher::{MethodMatcher, PathPattern};
pub use table::{PolicyError, PolicyRule, PolicyTable, DEFAULT_POLICY};
