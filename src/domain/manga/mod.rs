pub mod entity;

pub use entity::{CoverImage, MangaSummary, MangaTitle, TitleKey, YearBatch};
