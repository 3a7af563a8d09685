use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;

use super::{ChartFrame, ChartRenderError};

const CHART_WIDTH_PX: u32 = 1200;
const CHART_HEIGHT_PX: u32 = 480;

struct ChartStyle;

impl ChartStyle {
    const MARGIN: i32 = 16;
    const CAPTION_FONT_FAMILY: &'static str = "sans-serif";
    const CAPTION_FONT_SIZE: i32 = 28;
    const X_LABEL_AREA_SIZE: u32 = 40;
    const Y_LABEL_AREA_SIZE: u32 = 64;
    const X_LABEL_COUNT: usize = 8;
    const Y_LABEL_COUNT: usize = 6;
    const Y_HEADROOM: f64 = 1.1;
    const BACKGROUND: RGBColor = RGBColor(15, 23, 42);
    const GRID: RGBColor = RGBColor(148, 163, 184);
    const GRID_ALPHA: f64 = 0.1;
    const TEXT: RGBColor = RGBColor(148, 163, 184);
    const SERIES: [RGBColor; 4] = [
        RGBColor(34, 197, 94),
        RGBColor(59, 130, 246),
        RGBColor(234, 179, 8),
        RGBColor(239, 68, 68),
    ];

    fn series_line(index: usize) -> RGBColor {
        Self::SERIES[index % Self::SERIES.len()]
    }
}

pub fn render_chart_png(frame: &ChartFrame) -> Result<Vec<u8>, ChartRenderError> {
    if frame.points.len() < 2 {
        return Err(ChartRenderError::NotEnoughPoints);
    }

    let width = CHART_WIDTH_PX;
    let height = CHART_HEIGHT_PX;
    let mut rgb_buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let drawing_area =
            BitMapBackend::with_buffer(&mut rgb_buffer, (width, height)).into_drawing_area();
        drawing_area
            .fill(&ChartStyle::BACKGROUND)
            .map_err(|error| ChartRenderError::Backend(format!("background fill: {:?}", error)))?;

        let y_max = frame
            .points
            .iter()
            .flat_map(|point| point.values.iter().copied())
            .filter(|value| value.is_finite())
            .fold(0.0_f64, f64::max)
            .max(1.0)
            * ChartStyle::Y_HEADROOM;
        let x_max = frame.points.len() - 1;
        let labels = frame
            .points
            .iter()
            .map(|point| point.label.clone())
            .collect::<Vec<_>>();

        let mut chart = ChartBuilder::on(&drawing_area)
            .margin(ChartStyle::MARGIN)
            .caption(
                "Network Performance",
                (ChartStyle::CAPTION_FONT_FAMILY, ChartStyle::CAPTION_FONT_SIZE)
                    .into_font()
                    .color(&ChartStyle::TEXT),
            )
            .x_label_area_size(ChartStyle::X_LABEL_AREA_SIZE)
            .y_label_area_size(ChartStyle::Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(0..x_max, 0.0..y_max)
            .map_err(|error| ChartRenderError::Backend(format!("chart build: {:?}", error)))?;

        chart
            .configure_mesh()
            .x_labels(ChartStyle::X_LABEL_COUNT)
            .y_labels(ChartStyle::Y_LABEL_COUNT)
            .light_line_style(ChartStyle::GRID.mix(ChartStyle::GRID_ALPHA))
            .bold_line_style(ChartStyle::GRID.mix(ChartStyle::GRID_ALPHA))
            .label_style(("sans-serif", 14).into_font().color(&ChartStyle::TEXT))
            .x_label_formatter(&|index| labels.get(*index).cloned().unwrap_or_default())
            .y_label_formatter(&|value| format!("{:.1} Gbps", value))
            .draw()
            .map_err(|error| ChartRenderError::Backend(format!("mesh draw: {:?}", error)))?;

        for (series_index, series_label) in frame.series_labels.iter().enumerate() {
            let color = ChartStyle::series_line(series_index);
            chart
                .draw_series(LineSeries::new(
                    frame.points.iter().enumerate().filter_map(|(index, point)| {
                        point
                            .values
                            .get(series_index)
                            .copied()
                            .filter(|value| value.is_finite())
                            .map(|value| (index, value))
                    }),
                    color.stroke_width(2),
                ))
                .map_err(|error| ChartRenderError::Backend(format!("series draw: {:?}", error)))?
                .label(series_label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(("sans-serif", 14).into_font().color(&ChartStyle::TEXT))
            .border_style(ChartStyle::GRID)
            .draw()
            .map_err(|error| ChartRenderError::Backend(format!("legend draw: {:?}", error)))?;

        drawing_area
            .present()
            .map_err(|error| ChartRenderError::Backend(format!("present: {:?}", error)))?;
    }

    let rgb_image = RgbImage::from_raw(width, height, rgb_buffer).ok_or_else(|| {
        ChartRenderError::PngEncoding("image buffer conversion failed".to_string())
    })?;
    let mut output = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb_image)
        .write_to(&mut output, ImageFormat::Png)
        .map_err(|error| ChartRenderError::PngEncoding(error.to_string()))?;

    Ok(output.into_inner())
}
