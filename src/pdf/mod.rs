pub mod renderer;
pub mod text_layer;
pub mod validator;

pub use renderer::{render_to_images, RenderOptions};
pub use text_layer::{extract_text_layer, PdfTextLayer};
pub use validator::validate_pdf_path;
