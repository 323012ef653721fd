pub mod json_writer;
pub mod script;
pub mod summary;
