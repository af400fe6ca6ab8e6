pub mod compression;
pub mod pacparse;
