pub mod parrot38;
pub mod utility;
