pub mod edit;
pub mod error;
pub mod page;
pub mod table;
