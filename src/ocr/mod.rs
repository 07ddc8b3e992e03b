pub mod tesseract;

pub use tesseract::{installed_languages, TesseractEngine};
