pub mod models;
pub mod stats;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
