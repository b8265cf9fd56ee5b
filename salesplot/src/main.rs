mod options;

use anyhow::Error as AnyError;
use clap::Parser;
use options::Cli;
use plotters::{coord::ranged1d::SegmentValue, prelude::*};
use std::{fs, path::Path};

const MONTHS: [&str; 5] = ["Jan", "Feb", "Mar", "Apr", "May"];
const SALES: [f64; 5] = [100.0, 120.0, 140.0, 110.0, 160.0];
const PROFIT: [f64; 5] = [20.0, 25.0, 30.0, 22.0, 35.0];

const CHART_SIZE: (u32, u32) = (900, 500);

fn main() -> Result<(), AnyError> {
    let Cli { out_dir } = Cli::parse();
    fs::create_dir_all(&out_dir)?;

    write_html(
        &out_dir.join("chart1.html"),
        "Sales vs Profit",
        &sales_vs_profit()?,
    )?;
    write_html(
        &out_dir.join("chart2.html"),
        "Monthly Sales",
        &monthly_sales()?,
    )?;

    println!("charts written to {}", out_dir.display());
    Ok(())
}

/// Line chart of both series by month.
fn sales_vs_profit() -> Result<String, AnyError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let y_max = SALES.iter().fold(0.0_f64, |acc, &v| acc.max(v)) * 1.1;
        let mut chart = ChartBuilder::on(&root)
            .caption("Sales vs Profit", ("sans-serif", 28))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(0usize..MONTHS.len() - 1, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_labels(MONTHS.len())
            .x_label_formatter(&|idx| month_label(*idx))
            .x_desc("Month")
            .y_desc("Amount")
            .draw()?;

        chart
            .draw_series(LineSeries::new((0usize..).zip(SALES), BLUE.stroke_width(2)).point_size(4))?
            .label("Sales")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));
        chart
            .draw_series(
                LineSeries::new((0usize..).zip(PROFIT), GREEN.stroke_width(2)).point_size(4),
            )?
            .label("Profit")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.stroke_width(2)));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.9))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
    }
    Ok(svg)
}

/// Bar chart of the sales series.
fn monthly_sales() -> Result<String, AnyError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let y_max = SALES.iter().fold(0.0_f64, |acc, &v| acc.max(v)) * 1.1;
        let mut chart = ChartBuilder::on(&root)
            .caption("Monthly Sales", ("sans-serif", 28))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d((0usize..MONTHS.len()).into_segmented(), 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_label_formatter(&|segment| match segment {
                SegmentValue::Exact(idx) | SegmentValue::CenterOf(idx) => month_label(*idx),
                SegmentValue::Last => String::new(),
            })
            .x_desc("Month")
            .y_desc("Sales")
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.7).filled())
                .margin(30)
                .data((0usize..).zip(SALES)),
        )?;

        root.present()?;
    }
    Ok(svg)
}

fn month_label(idx: usize) -> String {
    MONTHS.get(idx).copied().unwrap_or_default().to_string()
}

fn write_html(path: &Path, title: &str, svg: &str) -> Result<(), AnyError> {
    let html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         </head>\n<body>\n{svg}\n</body>\n</html>\n"
    );
    fs::write(path, html)?;
    Ok(())
}
