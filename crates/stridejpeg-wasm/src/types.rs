//! WASM-compatible wrapper types.

use stridejpeg_core::{EncodeOptions, Encoder};
use wasm_bindgen::prelude::*;

use crate::encode::{layout_from_js, to_js_error};

/// A reusable JPEG encoder for JavaScript.
///
/// Holds quality and an optional ICC profile; every `encode` call is
/// independent.
#[wasm_bindgen]
pub struct JsEncoder {
    options: EncodeOptions,
}

#[wasm_bindgen]
impl JsEncoder {
    /// Create an encoder with the given JPEG quality (1-100).
    #[wasm_bindgen(constructor)]
    pub fn new(quality: u8) -> JsEncoder {
        JsEncoder {
            options: EncodeOptions {
                quality,
                ..Default::default()
            },
        }
    }

    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> u8 {
        self.options.quality
    }

    /// Embed this ICC profile in every encoded image.
    pub fn set_icc_profile(&mut self, profile: Vec<u8>) {
        self.options.icc_profile = Some(profile);
    }

    pub fn clear_icc_profile(&mut self) {
        self.options.icc_profile = None;
    }

    /// Encode `source` using a layout object (see `encode`).
    pub fn encode(&self, source: &[u8], layout: JsValue) -> Result<Vec<u8>, JsValue> {
        let layout = layout_from_js(layout)?;
        self.encoder().encode(source, &layout).map_err(to_js_error)
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsEncoder {
    pub(crate) fn encoder(&self) -> Encoder {
        Encoder::new(self.options.clone())
    }
}
