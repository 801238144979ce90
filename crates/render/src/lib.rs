//! PDF serialization: walks the laid-out page model and emits a complete
//! PDF byte stream (fonts referenced once per distinct face, one content
//! stream per page, pages tree, cross-reference table and trailer).

mod encoding;
mod error;
mod renderer;
mod utils;

pub use encoding::to_win_ansi;
pub use error::RenderError;
pub use renderer::{render_pdf, PdfSerializer};
pub use utils::flip_y;
