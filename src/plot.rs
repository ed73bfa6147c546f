use std::fmt;
use std::path::Path;

use plotters::data::float::pretty_print_float;
use plotters::prelude::*;

use crate::analysis::PlotConfiguration;
use crate::csv_input::Column;
use crate::error::{Error, Result};
use crate::estimate::Summary;
use crate::format;

static DEFAULT_FONT: FontFamily = FontFamily::SansSerif;
static POINT_SIZE: u32 = 3;

const DARK_BLUE: RGBColor = RGBColor(31, 120, 180);
const DARK_GREEN: RGBColor = RGBColor(51, 160, 44);
const DARK_ORANGE: RGBColor = RGBColor(255, 127, 0);

fn plot_error<E: fmt::Display>(path: &Path) -> impl FnOnce(E) -> Error + '_ {
    move |e| Error::Plot {
        path: path.to_owned(),
        message: e.to_string(),
    }
}

/// Observations as points against their position, the mean as a horizontal line and the
/// confidence interval as a shaded band
pub(crate) fn summary_figure(
    path: &Path,
    config: &PlotConfiguration,
    column: &Column,
    summary: &Summary,
    unit: &str,
) -> Result<()> {
    let data = &column.values;
    let ci = &summary.confidence_interval;
    let n = data.len() as f64;

    let (y_min, y_max) = data
        .iter()
        .fold((ci.lower_bound, ci.upper_bound), |(lo, hi), &y| {
            (lo.min(y), hi.max(y))
        });
    let pad = if y_max > y_min {
        (y_max - y_min) * 0.05
    } else {
        1.
    };

    let x_range = (0.0)..(n + 1.);
    let y_range = (y_min - pad)..(y_max + pad);

    let root_area = SVGBackend::new(path, config.size).into_drawing_area();
    root_area.fill(&WHITE).map_err(plot_error(path))?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption(&config.title, (DEFAULT_FONT, 20))
        .margin((5).percent())
        .set_label_area_size(LabelAreaPosition::Left, (5).percent_width().min(60))
        .set_label_area_size(LabelAreaPosition::Bottom, (5).percent_height().min(40))
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error(path))?;

    chart
        .configure_mesh()
        .x_desc(config.x_desc.as_str())
        .y_desc(config.y_desc.as_str())
        .x_label_formatter(&|x| pretty_print_float(*x, true))
        .light_line_style(TRANSPARENT)
        .draw()
        .map_err(plot_error(path))?;

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(1., ci.lower_bound), (n, ci.upper_bound)],
            DARK_ORANGE.mix(0.2).filled(),
        )))
        .map_err(plot_error(path))?
        .label(format!(
            "{} Confidence Interval",
            format::level(ci.confidence_level)
        ))
        .legend(|(x, y)| {
            Rectangle::new([(x, y - 5), (x + 20, y + 5)], DARK_ORANGE.mix(0.2).filled())
        });

    chart
        .draw_series(LineSeries::new(
            vec![(0., summary.mean), (n + 1., summary.mean)],
            DARK_GREEN.filled().stroke_width(2),
        ))
        .map_err(plot_error(path))?
        .label(format!(
            "Mean: {}",
            format::with_unit(&format::fixed(summary.mean), unit)
        ))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DARK_GREEN));

    chart
        .draw_series(
            (1..=data.len())
                .zip(data.iter())
                .map(|(x, y)| Circle::new((x as f64, *y), POINT_SIZE, DARK_BLUE.filled())),
        )
        .map_err(plot_error(path))?
        .label(config.series_label.as_str())
        .legend(|(x, y)| Circle::new((x + 10, y), POINT_SIZE, DARK_BLUE.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error(path))?;

    root_area.present().map_err(plot_error(path))?;

    info!("Wrote chart to {:?}", path);
    Ok(())
}
