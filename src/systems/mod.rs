pub mod export;
pub mod mesh;
pub mod overlay;
pub mod ui;
