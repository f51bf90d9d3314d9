//! CLI command implementations.

pub(crate) mod accounts;
pub(crate) mod fetch;
pub(crate) mod symbols;
