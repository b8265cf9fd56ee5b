use crate::{linspace::linspace, palette, EXTENT_KM};
use anyhow::Error as AnyError;
use demgrid::Dem;
use plotters::prelude::*;
use std::path::Path;

/// 12in x 10in at 300 dpi.
const SIZE: (u32, u32) = (3600, 3000);

/// Pixel width reserved for the map; the rest holds the colorbar.
const MAP_W: i32 = 3100;

/// Gradient strips drawn in the colorbar.
const BAR_STEPS: usize = 200;

pub fn render(dem: &Dem, out: &Path) -> Result<(), AnyError> {
    let root = BitMapBackend::new(out, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (map_area, bar_area) = root.split_horizontally(MAP_W);

    let max_elev = f64::from(dem.max_elevation()).max(1.0);
    let (rows, cols) = dem.dimensions();

    let mut chart = ChartBuilder::on(&map_area)
        .caption(
            "Netherlands Digital Elevation Model (Normal Amsterdam Peil)",
            ("sans-serif", 72),
        )
        .margin(40)
        .x_label_area_size(120)
        .y_label_area_size(140)
        .build_cartesian_2d(0.0..EXTENT_KM.0, 0.0..EXTENT_KM.1)?;

    chart
        .configure_mesh()
        .x_desc("Distance (km)")
        .y_desc("Distance (km)")
        .axis_desc_style(("sans-serif", 48))
        .label_style(("sans-serif", 36))
        .draw()?;

    #[allow(clippy::cast_precision_loss)]
    let cell_w = EXTENT_KM.0 / cols as f64;
    #[allow(clippy::cast_precision_loss)]
    let cell_h = EXTENT_KM.1 / rows as f64;

    // Row 0 is the southernmost scanline, so it lands at the bottom of
    // the y axis.
    chart.draw_series(dem.rows().enumerate().flat_map(|(row, scanline)| {
        scanline.iter().enumerate().map(move |(col, &elevation)| {
            #[allow(clippy::cast_precision_loss)]
            let x0 = col as f64 * cell_w;
            #[allow(clippy::cast_precision_loss)]
            let y0 = row as f64 * cell_h;
            let color = palette::terrain_color(f64::from(elevation) / max_elev);
            Rectangle::new([(x0, y0), (x0 + cell_w, y0 + cell_h)], color.filled())
        })
    }))?;

    draw_colorbar(&bar_area, max_elev)?;

    root.present()?;
    log::info!("wrote {}", out.display());
    Ok(())
}

fn draw_colorbar(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    max_elev: f64,
) -> Result<(), AnyError> {
    let mut bar = ChartBuilder::on(area)
        .margin(60)
        .margin_top(300)
        .margin_bottom(300)
        .y_label_area_size(110)
        .build_cartesian_2d(0.0..1.0, 0.0..max_elev)?;

    bar.configure_mesh()
        .disable_x_axis()
        .disable_x_mesh()
        .disable_y_mesh()
        .y_desc("Elevation (m above NAP)")
        .axis_desc_style(("sans-serif", 44))
        .label_style(("sans-serif", 36))
        .draw()?;

    let edges: Vec<f64> = linspace(0.0, max_elev, BAR_STEPS + 1).collect();
    bar.draw_series(edges.windows(2).map(|edge| {
        let color = palette::terrain_color(edge[0] / max_elev);
        Rectangle::new([(0.0, edge[0]), (1.0, edge[1])], color.filled())
    }))?;

    Ok(())
}
