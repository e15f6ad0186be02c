use mesh_core::Mesh;
use std::f64::consts::TAU;
use web_sys as web;

/// Clear the surface and draw every node as a filled circle at its live
/// position, radius `size`, fill from its RGBA color.
pub fn draw(ctx: &web::CanvasRenderingContext2d, mesh: &Mesh) {
    let dims = mesh.dimensions();
    ctx.clear_rect(0.0, 0.0, dims.width as f64, dims.height as f64);

    for node in mesh.nodes() {
        ctx.set_fill_style_str(&node.color.to_css());
        ctx.begin_path();
        if ctx
            .arc(
                node.pos.x as f64,
                node.pos.y as f64,
                node.size as f64,
                0.0,
                TAU,
            )
            .is_ok()
        {
            ctx.fill();
        }
        ctx.close_path();
    }
}
