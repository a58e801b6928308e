pub mod clear;
pub mod read;
pub mod schema;
pub mod write;

pub use clear::clear_messages;
pub use read::get_recent_messages;
pub use schema::ensure_schema;
pub use write::write_message;
