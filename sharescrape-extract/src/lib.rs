//! Chat-share page extraction.
//!
//! - Question/answer extraction by structural markers (`extract`)
//! - Whitespace normalisation of element text (`text`)
//! - Standalone HTML rendering of the extracted messages (`render`)
//!
//! Questions and answers are paired by their position in the page, not by
//! document structure. Pages that interleave several answers per question
//! come out misaligned; this mirrors how share pages have been scraped so far
//! and is kept for compatibility.

pub mod extract;
pub mod render;
pub mod text;

pub use extract::{extract, Extractor};
pub use render::render_html;
pub use text::normalize_whitespace;
