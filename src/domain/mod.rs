pub mod comment;
pub mod duration;
