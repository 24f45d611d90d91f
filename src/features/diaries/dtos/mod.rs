mod diary_dto;

pub use diary_dto::*;
