pub mod recommend;
pub mod request;
