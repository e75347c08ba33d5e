pub mod details;
pub mod links;
