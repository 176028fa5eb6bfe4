//! Frame encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode`] - Encode a strided source buffer described by a layout object
//! - [`encode_rgb8`] - Encode tightly packed RGB8 pixels
//!
//! # Example
//!
//! ```typescript
//! import { encode } from '@stridejpeg/wasm';
//!
//! // Float32 RGBA from a WebGL readback, written as RGB
//! const bytes = new Uint8Array(floats.buffer);
//! const jpeg = encode(bytes, {
//!   width, height,
//!   sourceFormat: 'float32',
//!   sourceChannels: 4,
//! }, 90);
//! ```

use stridejpeg_core::{EncodeOptions, Encoder, FrameLayout};
use wasm_bindgen::prelude::*;

/// Deserialize a JS layout object (camelCase keys, omitted keys default).
pub(crate) fn layout_from_js(layout: JsValue) -> Result<FrameLayout, JsValue> {
    serde_wasm_bindgen::from_value(layout)
        .map_err(|e| JsValue::from_str(&format!("Invalid frame layout: {}", e)))
}

pub(crate) fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Encode a source buffer to JPEG bytes.
///
/// # Arguments
///
/// * `source` - Raw source bytes as a `Uint8Array` (native byte order)
/// * `layout` - Object with `width`, `height` and optional `colorMode`,
///   `sourceFormat`, `sourceChannels`, `channelOffset`, `pixelStride`,
///   `rowStride`, `pixelOffset`, `rowOffset`
/// * `quality` - JPEG quality (1-100)
///
/// # Errors
///
/// Returns an error if the layout cannot be deserialized, does not fit the
/// source buffer, or encoding fails.
#[wasm_bindgen]
pub fn encode(source: &[u8], layout: JsValue, quality: u8) -> Result<Vec<u8>, JsValue> {
    let layout = layout_from_js(layout)?;
    Encoder::with_quality(quality)
        .encode(source, &layout)
        .map_err(to_js_error)
}

/// Encode tightly packed RGB8 pixel data to JPEG bytes.
#[wasm_bindgen]
pub fn encode_rgb8(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode_rgb8_inner(pixels, width, height, quality).map_err(to_js_error)
}

fn encode_rgb8_inner(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, stridejpeg_core::EncodeError> {
    let options = EncodeOptions {
        quality,
        ..Default::default()
    };
    Encoder::new(options).encode(pixels, &FrameLayout::new(width, height))
}
