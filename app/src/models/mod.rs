pub mod entities;
pub mod todos;
