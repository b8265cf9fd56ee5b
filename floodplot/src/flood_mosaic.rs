use crate::COVERAGE_KM2;
use anyhow::Error as AnyError;
use demgrid::Dem;
use plotters::{
    coord::Shift,
    prelude::*,
    style::{
        text_anchor::{HPos, Pos, VPos},
        FontDesc, FontFamily, FontStyle, FontTransform, IntoFont,
    },
};
use searise::{classify, land_loss, scenarios::flood_scenarios, CellClass};
use std::path::Path;

/// 18in x 15in at 300 dpi.
const SIZE: (u32, u32) = (5400, 4500);

/// Strip along the bottom holding the shared legend.
const LEGEND_H: i32 = 300;

/// Strip along the left holding the rotated scenario labels.
const LABEL_W: i32 = 220;

/// Strip along the top holding the year headers.
const HEADER_H: i32 = 160;

const ROW_LABELS: [&str; 3] = [
    "Optimistic (Low Emissions)",
    "Medium (Mixed Action)",
    "Pessimistic (High Emissions)",
];

pub fn render(dem: &Dem, out: &Path) -> Result<(), AnyError> {
    let scenarios = flood_scenarios()?;

    let root = BitMapBackend::new(out, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    #[allow(clippy::cast_possible_wrap)]
    let (upper, legend_area) = root.split_vertically(SIZE.1 as i32 - LEGEND_H);
    let (label_strip, grid_outer) = upper.split_horizontally(LABEL_W);
    let (header, grid_area) = grid_outer.split_vertically(HEADER_H);

    #[allow(clippy::cast_possible_wrap)]
    let cell_w = (SIZE.0 as i32 - LABEL_W) / 3;
    #[allow(clippy::cast_possible_wrap)]
    let cell_h = (SIZE.1 as i32 - LEGEND_H - HEADER_H) / 3;

    let centered = Pos::new(HPos::Center, VPos::Center);
    let header_font = FontDesc::new(FontFamily::SansSerif, 56.0, FontStyle::Bold);
    for (col, scenario) in scenarios.iter().enumerate() {
        #[allow(clippy::cast_possible_wrap)]
        let x = col as i32 * cell_w + cell_w / 2;
        header.draw(&Text::new(
            format!("Year {}", scenario.year),
            (x, HEADER_H / 2),
            TextStyle::from(header_font.clone()).pos(centered),
        ))?;
    }

    let label_font = FontDesc::new(FontFamily::SansSerif, 48.0, FontStyle::Bold)
        .transform(FontTransform::Rotate270);
    for (row, label) in ROW_LABELS.iter().enumerate() {
        #[allow(clippy::cast_possible_wrap)]
        let y = HEADER_H + row as i32 * cell_h + cell_h / 2;
        label_strip.draw(&Text::new(
            *label,
            (LABEL_W / 2, y),
            TextStyle::from(label_font.clone()).pos(centered),
        ))?;
    }

    // Severity rows top to bottom, years left to right.
    let cells = grid_area.split_evenly((3, 3));
    for (idx, cell) in cells.iter().enumerate() {
        let scenario = &scenarios[idx % 3];
        let sea_level_m = match idx / 3 {
            0 => scenario.low_m,
            1 => scenario.medium_m,
            _ => scenario.high_m,
        };
        draw_cell(cell, dem, sea_level_m)?;
    }

    draw_legend(&legend_area)?;

    root.present()?;
    log::info!("wrote {}", out.display());
    Ok(())
}

fn draw_cell(
    area: &DrawingArea<BitMapBackend, Shift>,
    dem: &Dem,
    sea_level_m: f64,
) -> Result<(), AnyError> {
    let (rows, cols) = dem.dimensions();
    #[allow(clippy::cast_precision_loss)]
    let (x_max, y_max) = (cols as f64, rows as f64);

    let mut chart = ChartBuilder::on(area)
        .margin(8)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart.draw_series(dem.rows().enumerate().flat_map(|(row, scanline)| {
        scanline.iter().enumerate().map(move |(col, &elevation)| {
            let color = match classify(f64::from(elevation), sea_level_m) {
                CellClass::Remaining => BLACK,
                CellClass::Lost => RED,
                CellClass::Ocean => WHITE,
            };
            #[allow(clippy::cast_precision_loss)]
            let (x0, y0) = (col as f64, row as f64);
            Rectangle::new([(x0, y0), (x0 + 1.0, y0 + 1.0)], color.filled())
        })
    }))?;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(0.0, 0.0), (x_max, y_max)],
        BLACK.stroke_width(3),
    )))?;

    let loss = land_loss(dem, sea_level_m, COVERAGE_KM2)?;
    area.draw(&Rectangle::new([(20, 20), (540, 150)], WHITE.mix(0.85).filled()))?;
    area.draw(&Rectangle::new([(20, 20), (540, 150)], BLACK.stroke_width(2)))?;
    area.draw(&Text::new(
        format!("+{sea_level_m:.2}m rise"),
        (40, 45),
        ("sans-serif", 44).into_font(),
    ))?;
    area.draw(&Text::new(
        format!("{} lost", loss.lost),
        (40, 100),
        ("sans-serif", 44).into_font(),
    ))?;

    Ok(())
}

fn draw_legend(area: &DrawingArea<BitMapBackend, Shift>) -> Result<(), AnyError> {
    let entries = [
        ("Remaining Land", BLACK),
        ("Ocean", WHITE),
        ("Land Lost", RED),
    ];
    for (idx, (label, color)) in entries.iter().enumerate() {
        #[allow(clippy::cast_possible_wrap)]
        let x0 = 1300 + idx as i32 * 1100;
        area.draw(&Rectangle::new([(x0, 100), (x0 + 70, 170)], color.filled()))?;
        area.draw(&Rectangle::new(
            [(x0, 100), (x0 + 70, 170)],
            BLACK.stroke_width(2),
        ))?;
        area.draw(&Text::new(
            *label,
            (x0 + 95, 115),
            ("sans-serif", 48).into_font(),
        ))?;
    }
    Ok(())
}
