//! Optional extensions to the base window follow controller.

#[cfg(feature = "extension_target_indicator")]
pub mod target_indicator;
