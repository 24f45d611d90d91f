mod diary;

pub use diary::*;
