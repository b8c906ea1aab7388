//! Visual element model and frame buffer for the Analemma watchface
//!
//! This crate provides:
//! - `TextElement` and `BitmapElement` leaf nodes with dirty tracking
//! - `FrameBuffer`, the raster buffer animation frames are decoded into
//! - `DisplayBackend` trait for the physical display
//!
//! # Architecture
//!
//! Elements are pure model objects: they hold content and a dirty flag and
//! know how to draw themselves into any `embedded-graphics` `DrawTarget`.
//! The face logic mutates elements; the firmware composites dirty elements
//! and flushes through a `DisplayBackend` implementation.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod element;
pub mod framebuffer;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use element::{BitmapElement, TextElement, TEXT_LEN};
pub use framebuffer::{FrameBuffer, FrameBufferError};
