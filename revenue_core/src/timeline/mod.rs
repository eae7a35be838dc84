pub mod derived_point;
pub mod timeline;
