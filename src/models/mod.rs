pub mod bucket;
pub mod derived;
pub mod metric;
pub mod table;
