use std::{f64::consts::PI, path::Path};

use plotters::prelude::*;

use crate::reports::{AgeBin, DepartmentShare, ReportData, ReportKind, StaffComparison};

const SIZE: (u32, u32) = (900, 600);
const FONT: &str = "sans-serif";

pub fn render(kind: ReportKind, data: &ReportData, path: &Path) -> anyhow::Result<()> {
    match data {
        ReportData::Shares(shares) => draw_pie(kind.title(), shares, path),
        ReportData::Ages(bins) => draw_histogram(kind.title(), bins, path),
        ReportData::Staffing(rows) => draw_comparison(kind.title(), rows, path),
    }
}

fn draw_pie(title: &str, shares: &[DepartmentShare], path: &Path) -> anyhow::Result<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, (FONT, 24))?;
    let (pie_area, legend_area) = root.split_horizontally(620);

    let (width, height) = pie_area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.4;
    let total: usize = shares.iter().map(|share| share.employees).sum();

    legend_area.draw(&Text::new("Departamento", (10, 20), (FONT, 16).into_font()))?;

    // Start at twelve o'clock and go counter-clockwise.
    let mut angle = -PI / 2.0;
    for (index, share) in shares.iter().enumerate() {
        let fraction = share.employees as f64 / total as f64;
        let sweep = 2.0 * PI * fraction;
        let color = Palette99::pick(index);

        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for step in 0..=steps {
            let a = angle - sweep * step as f64 / steps as f64;
            points.push((
                center.0 + (radius * a.cos()) as i32,
                center.1 + (radius * a.sin()) as i32,
            ));
        }
        pie_area.draw(&Polygon::new(points, color.filled()))?;

        let middle = angle - sweep / 2.0;
        pie_area.draw(&Text::new(
            format!("{:.1}%", fraction * 100.0),
            (
                center.0 + (radius * 0.6 * middle.cos()) as i32 - 16,
                center.1 + (radius * 0.6 * middle.sin()) as i32 - 7,
            ),
            (FONT, 14).into_font(),
        ))?;

        let y = 50 + index as i32 * 24;
        legend_area.draw(&Rectangle::new([(10, y), (24, y + 14)], color.filled()))?;
        legend_area.draw(&Text::new(
            share.department.clone(),
            (32, y),
            (FONT, 14).into_font(),
        ))?;

        angle -= sweep;
    }

    root.present()?;
    Ok(())
}

fn draw_histogram(title: &str, bins: &[AgeBin], path: &Path) -> anyhow::Result<()> {
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        anyhow::bail!("histogram has no bins");
    };
    let max_count = bins.iter().map(|bin| bin.count).max().unwrap_or(0);

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(first.start..last.end, 0usize..max_count + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Edad")
        .y_desc("Frecuencia")
        .draw()?;

    chart.draw_series(bins.iter().map(|bin| {
        Rectangle::new([(bin.start, 0), (bin.end, bin.count)], BLUE.mix(0.6).filled())
    }))?;

    root.present()?;
    Ok(())
}

fn draw_comparison(title: &str, rows: &[StaffComparison], path: &Path) -> anyhow::Result<()> {
    let top = rows
        .iter()
        .map(|row| (row.required.max(0) as f64).max(row.actual as f64))
        .fold(0.0, f64::max)
        .max(1.0)
        * 1.15;
    let count = rows.len();

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 20))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..count as f64 - 0.5, 0.0..top)?;

    let department_label = |x: &f64| {
        let index = x.round();
        if (x - index).abs() > 1e-6 || index < 0.0 {
            return String::new();
        }
        rows.get(index as usize)
            .map(|row| row.department.clone())
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(count)
        .x_label_formatter(&department_label)
        .x_desc("Departamento")
        .y_desc("Cantidad")
        .draw()?;

    let required_style = BLUE.mix(0.7).filled();
    let actual_style = RED.mix(0.7).filled();

    chart
        .draw_series(rows.iter().enumerate().map(|(index, row)| {
            let x = index as f64;
            Rectangle::new([(x - 0.4, 0.0), (x, row.required.max(0) as f64)], required_style)
        }))?
        .label("Necesarios")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], required_style));

    chart
        .draw_series(rows.iter().enumerate().map(|(index, row)| {
            let x = index as f64;
            Rectangle::new([(x, 0.0), (x + 0.4, row.actual as f64)], actual_style)
        }))?
        .label("Reales")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], actual_style));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
