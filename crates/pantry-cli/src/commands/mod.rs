pub mod categories;
pub mod info;
pub mod recommend;
pub mod serve;
