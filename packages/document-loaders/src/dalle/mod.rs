//! DALL-E image generation wrapper.
//!
//! - [`request`] - per-model parameter rules and the wrapper builder
//! - [`wrapper`] - the wrapper itself

pub mod request;
pub mod wrapper;

pub use request::{supports_quality, DallEApiWrapperBuilder, ImageSettings, DALL_E_2, DALL_E_3};
pub use wrapper::{DallEApiWrapper, NO_IMAGE_GENERATED};
