pub mod region;
pub mod render;
pub mod theme;
