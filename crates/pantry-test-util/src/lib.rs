pub mod dataset;
pub mod index;
pub mod request;
pub mod text;
