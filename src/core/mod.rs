pub mod category;
pub mod color;
pub mod hold;
