//! stridejpeg WASM - WebAssembly bindings for stridejpeg
//!
//! This crate exposes stridejpeg-core encoding to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `encode` - One-shot encode functions
//! - `types` - `JsEncoder`, a reusable encoder with settings
//!
//! # Usage
//!
//! ```typescript
//! import init, { encode, JsEncoder } from '@stridejpeg/wasm';
//!
//! await init();
//!
//! // Grayscale JPEG from the alpha channel of RGBA8 canvas data
//! const jpeg = encode(imageData.data, {
//!   width: imageData.width,
//!   height: imageData.height,
//!   colorMode: 'grayscale',
//!   sourceChannels: 4,
//!   channelOffset: 3,
//! }, 90);
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod types;

pub use encode::{encode, encode_rgb8};
pub use types::JsEncoder;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
