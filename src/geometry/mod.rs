pub mod hit_testing;
pub mod rect;

pub use hit_testing::{Handle, HandlePriority, HandleSet, HANDLE_HALF_WIDTH};
pub use rect::{PixelBounds, SelectionRect, SortedBounds};
