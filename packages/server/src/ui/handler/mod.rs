pub mod http;

pub use http::{list_messages, list_playtime, list_staffs};
