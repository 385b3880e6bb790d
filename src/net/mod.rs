//! Network layer: the authenticated HTTP pipeline and gateway wire types.

pub mod http;
pub mod types;

#[cfg(test)]
pub mod test_helpers;
