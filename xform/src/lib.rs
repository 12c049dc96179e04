#![deny(clippy::dbg_macro)]
//! Affine transform scopes for PDF content streams.
//!
//! [`TransformStack`] writes `q`, `cm` and `Q` operators through a
//! [`ContentSink`] and keeps the bookkeeping of open scopes: the matrices
//! logged per depth and, per [`Surface`], the offset of the latest transform.
pub mod canvas;
mod error;
pub mod graphics;
mod option;
mod sink;
mod stack;
pub mod surface;
pub mod trans;

pub use canvas::MemoryCanvas;
pub use error::{TransformError, TransformResult};
pub use option::{ScopeClosePolicy, TransformOption, TransformOptionBuilder};
pub use sink::ContentSink;
pub use stack::TransformStack;
pub use surface::Surface;
pub use trans::AffineMatrix;
