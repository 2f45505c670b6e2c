pub mod grid;
pub mod io;
pub mod overlay;
pub mod traits;

pub use self::grid::{Grid2d, NormalizedImage, NO_DATA};
pub use self::traits::{ImageView, Rows};
