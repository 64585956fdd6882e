//! Headless walk through an editing session: the default eight-point strip
//! is rebuilt after every simulated drag and width change.
//!
//! Usage:
//! ```text
//! cargo run --example ribbon_editor
//! RUST_LOG=ribbon=debug cargo run --example ribbon_editor
//! ```

use ribbon::math::{Point2, Vector2};
use ribbon::{LineStrip, MiterPolicy, RibbonMesh, RibbonParams};
use tracing::{info, warn};

fn main() -> ribbon::Result<()> {
    // Default: WARN for everything, INFO for ribbon and this demo.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("ribbon_editor=info".parse().unwrap_or_default())
        .add_directive("ribbon=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut strip = LineStrip::default();
    let mut params = RibbonParams::default();
    let mut mesh = RibbonMesh::new();

    strip.rebuild_mesh(&params, &mut mesh)?;
    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "initial scene"
    );

    // A short drag on handle 3, delivered as per-event deltas.
    for _ in 0..5 {
        strip.drag(3, Vector2::new(4.0, -6.0))?;
        strip.rebuild_mesh(&params, &mut mesh)?;
    }
    info!(point = ?strip.point(3), "dragged handle 3");

    // Width slider moved on the fill layer.
    params.layers[0] = params.layers[0].with_half_width(25.0)?;
    strip.rebuild_mesh(&params, &mut mesh)?;
    info!(half_width = params.layers[0].half_width(), "changed fill width");

    // Fold the path back on itself at the handle under the cursor; the raw
    // miter blows up there and a clamp holds it.
    let Some(handle) = strip.pick(Point2::new(-70.0, -70.0), 10.0) else {
        return Ok(());
    };
    if let Some(prev) = handle.checked_sub(1).and_then(|i| strip.point(i)) {
        strip.set_point(handle + 1, prev)?;
    }
    if let Err(err) = strip.rebuild_mesh(&params, &mut mesh) {
        warn!(%err, "edit rejected, switching to clamped miters");
        params.miter = MiterPolicy::clamp(4.0)?;
        strip.rebuild_mesh(&params, &mut mesh)?;
    }

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        indices = mesh.index_count(),
        "final mesh"
    );
    Ok(())
}
