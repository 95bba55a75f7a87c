//! Pure rendering transforms: markup normalization and pagination.
//!
//! Nothing here holds state; the export encoder and the interactive display
//! both consume these functions on demand.

mod markup;
mod pagination;

pub use markup::{to_display, to_plain, DisplayLine, LineWeight, StructuredText};
pub use pagination::{paginate, Page, PageGeometry};
