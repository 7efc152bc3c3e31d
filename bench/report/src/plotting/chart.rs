use crate::config::{LegendLayout, LegendOrient, Margins};
use charming::{
    component::{
        Axis, DataView, Feature, Grid, Legend, LegendSelectedMode, LegendType, Restore,
        SaveAsImage, Title, Toolbox, ToolboxDataZoom,
    },
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, Formatter,
        ItemStyle, Label, LabelPosition, LineStyle, LineStyleType, NameLocation, Orient, SplitLine, TextAlign,
        TextStyle, Tooltip,
    },
    series::{Bar, Line, Scatter},
    Chart,
};

pub struct BenchChart {
    pub inner: Chart,
}

const AXIS_TEXT_SIZE: u32 = 14;

impl BenchChart {
    /// Create a new `BenchChart` with default tooltip, legend, grid, and toolbox.
    pub fn new(
        title: &str,
        subtext: &str,
        dark: bool,
        legend: &LegendLayout,
        margins: &Margins,
    ) -> Self {
        let chart = Chart::new()
            .title(
                Title::new()
                    .text(title)
                    .text_align(TextAlign::Center)
                    .subtext(subtext)
                    .text_style(TextStyle::new().font_size(18).font_weight("bold"))
                    .subtext_style(TextStyle::new().font_size(12).line_height(18))
                    .left("50%")
                    .top("1%"),
            )
            .tooltip(Tooltip::new().axis_pointer(AxisPointer::new().type_(AxisPointerType::Cross)))
            .grid(
                Grid::new()
                    .left(margins.left.as_str())
                    .right(margins.right.as_str())
                    .top(margins.top.as_str())
                    .bottom(margins.bottom.as_str()),
            )
            .toolbox(
                Toolbox::new().feature(
                    Feature::new()
                        .data_zoom(ToolboxDataZoom::new())
                        .data_view(DataView::new())
                        .restore(Restore::new())
                        .save_as_image(SaveAsImage::new()),
                ),
            );

        let chart = if legend.show {
            let orient = match legend.orient {
                LegendOrient::Vertical => Orient::Vertical,
                LegendOrient::Horizontal => Orient::Horizontal,
            };
            chart.legend(
                Legend::new()
                    .show(true)
                    .right(legend.right.as_str())
                    .top(legend.top.as_str())
                    .orient(orient)
                    .selected_mode(LegendSelectedMode::Multiple)
                    .text_style(TextStyle::new().font_size(12))
                    .padding(10)
                    .item_gap(10)
                    .item_width(25)
                    .item_height(14)
                    .type_(LegendType::Scroll),
            )
        } else {
            chart
        };

        let chart = if dark {
            chart.background_color("#242424")
        } else {
            chart
        };

        Self { inner: chart }
    }

    /// Configure the Y axis as category axis, first category at the bottom.
    pub fn with_category_y_axis(mut self, axis_label: &str, categories: Vec<String>) -> Self {
        self.inner = self.inner.y_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name(axis_label)
                .name_location(NameLocation::End)
                .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
                .name_gap(15)
                .data(categories),
        );
        self
    }

    /// Configure the X axis as value axis.
    pub fn with_value_x_axis(mut self, axis_label: &str) -> Self {
        self.inner = self.inner.x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(axis_label)
                .name_location(NameLocation::End)
                .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
                .name_gap(15)
                .split_line(SplitLine::new().show(true)),
        );
        self
    }

    /// Configure the X axis as time axis with an ECharts label template, e.g. `{HH}h`.
    pub fn with_time_x_axis(mut self, axis_label: &str, label_format: &str) -> Self {
        self.inner = self.inner.x_axis(
            Axis::new()
                .type_(AxisType::Time)
                .name(axis_label)
                .name_location(NameLocation::End)
                .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
                .name_gap(15)
                .axis_label(AxisLabel::new().formatter(label_format))
                .split_line(SplitLine::new().show(true)),
        );
        self
    }

    /// Configure the Y axis as value axis.
    pub fn with_value_y_axis(mut self, axis_label: &str) -> Self {
        self.inner = self.inner.y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(axis_label)
                .name_location(NameLocation::End)
                .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
                .name_gap(15)
                .position("left")
                .axis_label(AxisLabel::new())
                .split_line(SplitLine::new().show(true)),
        );
        self
    }

    /// Add a bar series; one value per category. Non-finite values serialize as
    /// `null` and leave the category empty.
    pub fn add_bar_series(
        mut self,
        name: &str,
        data: Vec<f64>,
        color: &str,
        stack: Option<&str>,
    ) -> Self {
        let mut bar = Bar::new()
            .name(name)
            .data(data)
            .label(Label::new().show(true).position(LabelPosition::Right))
            .item_style(ItemStyle::new().color(color));

        if let Some(stack) = stack {
            bar = bar.stack(stack);
        }

        self.inner = self.inner.series(bar);
        self
    }

    /// Dashed reference line through one value per category (mean, median).
    pub fn add_reference_line(mut self, name: &str, data: Vec<f64>, color: &str) -> Self {
        let line = Line::new()
            .name(name)
            .data(data)
            .show_symbol(false)
            .line_style(
                LineStyle::new()
                    .width(2.5)
                    .type_(LineStyleType::Dashed)
                    .color(color),
            )
            .item_style(ItemStyle::new().color(color));

        self.inner = self.inner.series(line);
        self
    }

    /// Dashed reference segment given as `[x, y]` pairs.
    pub fn add_reference_segment(mut self, name: &str, points: Vec<Vec<f64>>, color: &str) -> Self {
        let line = Line::new()
            .name(name)
            .data(points)
            .show_symbol(false)
            .line_style(
                LineStyle::new()
                    .width(1.5)
                    .type_(LineStyleType::Dashed)
                    .color(color),
            )
            .item_style(ItemStyle::new().color(color));

        self.inner = self.inner.series(line);
        self
    }

    /// Filled area below a line given as `[x, y]` pairs.
    pub fn add_area_series(mut self, name: &str, points: Vec<Vec<f64>>, color: &str) -> Self {
        let line = Line::new()
            .name(name)
            .data(points)
            .show_symbol(false)
            .emphasis(Emphasis::new())
            .area_style(AreaStyle::new())
            .line_style(LineStyle::new().width(1))
            .item_style(ItemStyle::new().color(color));

        self.inner = self.inner.series(line);
        self
    }

    /// Hover text per scatter point, looked up by data index. Other series
    /// show their name and value.
    pub fn with_point_tooltips(mut self, tooltips: Vec<String>) -> Self {
        let tooltips = serde_json::Value::from(tooltips);
        let formatter = format!(
            "function (params) {{ var tooltips = {tooltips}; \
             if (params.seriesType === 'scatter' && tooltips[params.dataIndex] !== undefined) \
             {{ return tooltips[params.dataIndex]; }} \
             return params.seriesName + ': ' + params.value[1]; }}"
        );
        self.inner = self.inner.tooltip(
            Tooltip::new()
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Cross))
                .formatter(Formatter::Function(formatter.into())),
        );
        self
    }

    pub fn add_scatter_series(
        mut self,
        name: &str,
        points: Vec<Vec<f64>>,
        color: &str,
        symbol_size: f64,
    ) -> Self {
        let scatter = Scatter::new()
            .name(name)
            .symbol_size(symbol_size)
            .data(points)
            .item_style(ItemStyle::new().color(color));

        self.inner = self.inner.series(scatter);
        self
    }
}
