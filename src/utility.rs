pub mod file;
pub mod str;
