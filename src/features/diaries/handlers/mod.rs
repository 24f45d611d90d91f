mod diary_handler;

pub use diary_handler::*;
