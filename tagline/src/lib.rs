pub mod badge;
pub mod config;
pub mod palette;
pub mod schema;
pub mod status;
pub mod tag_palette;

pub use badge::Badge;
pub use palette::{Assignment, Palette, PaletteError, StyleEntry};
pub use status::StatusTag;
pub use tag_palette::select_style;
