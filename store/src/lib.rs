#[cfg(test)]
use rstest_reuse;

pub mod commitop;
pub mod refservice;
pub mod tagservice;
pub mod utils;
pub mod wipservice;
