//! Edge and line traversal: the boundary pixels that serve as candidate line
//! end points, and the pixels covered by a segment between two of them.

mod boundary;
mod raster;

pub use boundary::{BoundaryEdge, BoundaryPixelBrowser, EdgePixels};
pub use raster::{browse_line, rasterize_line};
