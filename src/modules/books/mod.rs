pub mod models;
pub mod service;

pub use models::{Book, BookForm};
pub use service::BookService;
