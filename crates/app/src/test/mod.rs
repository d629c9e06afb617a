//! Shared test support.

mod helpers;

pub(crate) use catalog::FakeCatalog;
pub(crate) use helpers::*;
