//! Small shared helpers.

pub mod numeric;
