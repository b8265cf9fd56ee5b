use anyhow::Error as AnyError;
use plotters::{
    prelude::*,
    series::DashedLineSeries,
    style::{FontTransform, IntoFont},
};
use searise::scenarios::{upper_bound_series, Pathway};
use std::path::Path;

/// 14in x 8in at 300 dpi.
const SIZE: (u32, u32) = (4200, 2400);

pub fn render(out: &Path) -> Result<(), AnyError> {
    let low = upper_bound_series(Pathway::LowEmissions)?;
    let high = upper_bound_series(Pathway::HighEmissions)?;
    let y_max = high.iter().map(|&(_, v)| v).fold(0.0, f64::max) * 1.1;

    let root = BitMapBackend::new(out, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "IPCC AR6 Sea Level Rise Projections (with Linear Extrapolations to 2500)",
            ("sans-serif", 64),
        )
        .margin(40)
        .x_label_area_size(110)
        .y_label_area_size(130)
        .build_cartesian_2d(2040.0..2520.0, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Sea Level Rise (meters above current level)")
        .axis_desc_style(("sans-serif", 46))
        .label_style(("sans-serif", 34))
        .draw()?;

    // Shaded range between the two pathways, across data and
    // extrapolation alike.
    let band: Vec<(f64, f64)> = as_f64(&low)
        .into_iter()
        .chain(as_f64(&high).into_iter().rev())
        .collect();
    chart
        .draw_series(std::iter::once(Polygon::new(band, &BLACK.mix(0.15))))?
        .label("Projection Range")
        .legend(|(x, y)| Rectangle::new([(x, y - 8), (x + 30, y + 8)], BLACK.mix(0.15).filled()));

    // IPCC interval: solid with markers.
    chart
        .draw_series(LineSeries::new(as_f64(&low[..3]), BLUE.stroke_width(6)).point_size(10))?
        .label("Low Emissions (SSP1-1.9) - IPCC Data")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], BLUE.stroke_width(6)));
    chart
        .draw_series(LineSeries::new(as_f64(&high[..3]), RED.stroke_width(6)).point_size(10))?
        .label("High Emissions (SSP5-8.5) - IPCC Data")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], RED.stroke_width(6)));

    // Extrapolated tail: dashed.
    chart
        .draw_series(DashedLineSeries::new(
            as_f64(&low[2..]),
            18,
            12,
            BLUE.stroke_width(4),
        ))?
        .label("Low Emissions - Extrapolated")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], BLUE.stroke_width(4)));
    chart
        .draw_series(DashedLineSeries::new(
            as_f64(&high[2..]),
            18,
            12,
            RED.stroke_width(4),
        ))?
        .label("High Emissions - Extrapolated")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], RED.stroke_width(4)));

    // Divider between tabulated data and extrapolation.
    chart.draw_series(DashedLineSeries::new(
        vec![(2150.0, 0.0), (2150.0, y_max)],
        10,
        10,
        BLACK.mix(0.5).stroke_width(3),
    ))?;
    chart.draw_series(std::iter::once(Text::new(
        "IPCC | Extrapolation",
        (2150.0, y_max * 0.5),
        ("sans-serif", 36)
            .into_font()
            .transform(FontTransform::Rotate270)
            .color(&BLACK.mix(0.6)),
    )))?;

    // Key values at the 2100 pivot and the 2500 endpoint.
    let key_points = [low[1], high[1], low[4], high[4]];
    chart.draw_series(key_points.iter().map(|&(year, rise)| {
        Text::new(
            format!("{rise:.2}m"),
            (f64::from(year) + 6.0, rise + y_max * 0.015),
            ("sans-serif", 34).into_font(),
        )
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.9))
        .border_style(&BLACK)
        .label_font(("sans-serif", 36))
        .draw()?;

    root.present()?;
    log::info!("wrote {}", out.display());
    Ok(())
}

fn as_f64(series: &[(i32, f64)]) -> Vec<(f64, f64)> {
    series
        .iter()
        .map(|&(year, rise)| (f64::from(year), rise))
        .collect()
}
