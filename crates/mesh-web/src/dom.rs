use anyhow::anyhow;
use mesh_core::ViewportDimensions;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Snapshot of `document.body` dimensions. Falls back to zeros when the body
/// is unreachable; the mesh then degrades to an empty grid instead of
/// failing.
pub fn body_dimensions() -> ViewportDimensions {
    let Some(body) = window_document().and_then(|d| d.body()) else {
        return ViewportDimensions::default();
    };
    ViewportDimensions::new(
        body.client_width() as f32,
        body.client_height() as f32,
        body.scroll_height() as f32,
    )
}

/// Look up the canvas by element id and acquire its 2D context.
pub fn canvas_context(
    canvas_id: &str,
) -> anyhow::Result<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)> {
    let document = window_document().ok_or_else(|| anyhow!("no document"))?;
    let element = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow!("missing #{canvas_id}"))?;
    let canvas: web::HtmlCanvasElement = element
        .dyn_into()
        .map_err(|e| anyhow!("#{canvas_id} is not a canvas: {e:?}"))?;
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("get_context failed: {e:?}"))?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow!("unexpected context type: {e:?}"))?;
    Ok((canvas, ctx))
}

/// Match the canvas backing store to its CSS size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    canvas.set_width(canvas.client_width().max(1) as u32);
    canvas.set_height(canvas.client_height().max(1) as u32);
}
