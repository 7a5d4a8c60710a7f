pub mod capabilities;
pub mod dump;
pub mod parse;
pub mod schema;
