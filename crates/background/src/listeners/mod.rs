//! Concrete listener implementations.
//!
//! Each listener is a separate module for clarity.

pub mod completion;
pub mod fill;
pub mod markers;
pub mod surface;

pub use completion::FillCompletion;
pub use fill::FillTrigger;
pub use markers::PageMarkers;
pub use surface::SurfaceTrigger;
