pub mod import;
pub mod initdb;

pub use import::import;
pub use initdb::init_database;
