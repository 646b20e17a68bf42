//! Conversion WASM bindings.
//!
//! # Functions
//!
//! - [`convert`] - Resize and size-target an image; resolves a `Promise`
//! - [`convert_blocking`] - Same work without yielding between attempts
//! - [`download_filename`] - Name for the downloaded file
//!
//! # Example
//!
//! ```typescript
//! import { convert } from '@cutpic/wasm';
//!
//! downloadBtn.disabled = true;
//! const result = await convert(image, width, height, targetMb, 1);
//! const blob = new Blob([result.bytes()], { type: result.mime_type });
//! saveAs(blob, result.filename(file.name));
//! alert(`Image processed and downloaded! ${result.summary}`);
//! downloadBtn.disabled = false;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::types::{filter_from_u8, JsConversionResult, JsSourceImage};
use cutpic_core::{
    ConversionRequest, ConversionResult, ConvertError, OutputFormat, SearchParams, SourceFormat,
};
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

/// Resize an image and re-encode it to approximately `target_mb` megabytes.
///
/// The search yields to the browser event loop between encode attempts, so
/// the page stays responsive. Only one conversion should run at a time; the
/// caller is expected to disable its trigger until the promise settles.
///
/// # Arguments
///
/// * `image` - The decoded upload (not consumed)
/// * `width` - Output width in pixels (must be positive)
/// * `height` - Output height in pixels (must be positive)
/// * `target_mb` - Target size in megabytes (must be positive)
/// * `filter` - Resize algorithm: 0=Nearest, 1=Bilinear (default), 2=Lanczos3
/// * `params` - Optional search overrides, e.g. `{ maxIterations: 10 }`
///
/// # Returns
///
/// A `Promise` resolving to a `JsConversionResult`.
///
/// # Errors
///
/// Throws synchronously if `params` is malformed. The promise rejects with a
/// message for invalid dimensions/target size or an encode failure.
#[wasm_bindgen]
pub fn convert(
    image: &JsSourceImage,
    width: i32,
    height: i32,
    target_mb: f64,
    filter: u8,
    params: JsValue,
) -> Result<Promise, JsValue> {
    let source = image.source().clone();
    let params = parse_params(params)?;
    let filter = filter_from_u8(filter);

    Ok(future_to_promise(async move {
        let request = ConversionRequest::new(&source, width.into(), height.into(), target_mb)
            .with_filter(filter);
        let result = cutpic_core::convert_async(&request, params, pause)
            .await
            .map_err(to_js_error)?;
        Ok(into_js_result(result, width, height).into())
    }))
}

/// Blocking variant of [`convert`] for use inside a Web Worker.
#[wasm_bindgen]
pub fn convert_blocking(
    image: &JsSourceImage,
    width: i32,
    height: i32,
    target_mb: f64,
    filter: u8,
    params: JsValue,
) -> Result<JsConversionResult, JsValue> {
    let params = parse_params(params)?;
    let request = ConversionRequest::new(image.source(), width.into(), height.into(), target_mb)
        .with_filter(filter_from_u8(filter));

    let result = cutpic_core::convert(&request, params).map_err(to_js_error)?;
    Ok(into_js_result(result, width, height))
}

/// Search parameters with every default filled in, as a JS object.
#[wasm_bindgen]
pub fn default_search_params() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&SearchParams::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_params(params: JsValue) -> Result<SearchParams, JsValue> {
    if params.is_undefined() || params.is_null() {
        return Ok(SearchParams::default());
    }
    serde_wasm_bindgen::from_value(params)
        .map_err(|e| JsValue::from_str(&format!("Invalid search parameters: {e}")))
}

/// File name for a download of `width x height` pixels encoded as `mime`.
///
/// # Errors
///
/// Throws if `mime` is not a JPEG or PNG type.
///
/// # Example
///
/// ```typescript
/// download_filename('beach.jpeg', 800, 600, 'image/jpeg'); // "cutpic-beach_800x600.jpg"
/// ```
#[wasm_bindgen]
pub fn download_filename(
    original_name: &str,
    width: u32,
    height: u32,
    mime: &str,
) -> Result<String, JsValue> {
    let format = SourceFormat::from_mime(mime)
        .map(OutputFormat::for_source)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(cutpic_core::download_filename(original_name, width, height, format))
}

fn to_js_error(err: ConvertError) -> JsValue {
    tracing::error!(error = %err, "conversion failed");
    JsValue::from_str(&err.to_string())
}

fn into_js_result(result: ConversionResult, width: i32, height: i32) -> JsConversionResult {
    // Dimensions were validated positive by the conversion itself.
    JsConversionResult::new(result, width as u32, height as u32)
}

/// Resolve after `delay` on the browser timer queue.
///
/// Outside a window context (no `setTimeout` available) this resolves
/// immediately, which still yields once to the microtask queue.
fn pause(delay: Duration) -> impl Future<Output = ()> {
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    let promise = Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window()
            .map(|window| {
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                    .is_ok()
            })
            .unwrap_or(false);
        if !scheduled {
            // resolve() of a fresh promise cannot throw
            let _ = resolve.call0(&JsValue::UNDEFINED);
        }
    });

    async move {
        // The promise only ever resolves; reject is never called.
        let _ = JsFuture::from(promise).await;
    }
}
