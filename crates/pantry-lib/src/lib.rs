pub mod config;
pub mod context;
pub mod dataset;
pub mod features;
pub mod index;
pub mod output;
pub mod pipeline;
pub mod runtime;

#[cfg(test)]
pub mod test_util;
