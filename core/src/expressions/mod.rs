//! SQL expressions and conditions
//!
//! Dialect-neutral building blocks used by the condition builder. Anything whose
//! syntax differs between databases goes through [`Dialect`](crate::Dialect).

pub mod conditions;

pub use conditions::*;
