//! Chart generation and rendering for the reports page.
//!
//! This module creates interactive ECharts visualizations from a [Report]:
//! - **Expenses by Category**: pie chart of each category's share of expenses
//! - **Income vs Expenses**: bar chart of the overall totals
//! - **Monthly Evolution**: income, expenses and balance per month
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, ItemStyle, JsFunction,
        Orient, Tooltip, Trigger,
    },
    series::{Bar, Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{html::HeadElement, report::aggregation::Report};

const INCOME_COLOR: &str = "#4caf50";
const EXPENSE_COLOR: &str = "#f44336";
const BALANCE_COLOR: &str = "#2196f3";

/// A report chart with its HTML container ID and ECharts configuration.
pub(super) struct ReportChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Build the charts for `report`.
///
/// The category chart is left out when there are no expenses to share out.
pub(super) fn report_charts(report: &Report) -> Vec<ReportChart> {
    let mut charts = Vec::with_capacity(3);

    if !report.expenses_by_category.is_empty() {
        charts.push(ReportChart {
            id: "category-chart",
            options: category_chart(report).to_string(),
        });
    }

    charts.push(ReportChart {
        id: "income-expense-chart",
        options: income_expense_chart(report).to_string(),
    });
    charts.push(ReportChart {
        id: "monthly-chart",
        options: monthly_chart(report).to_string(),
    });

    charts
}

/// Renders the HTML containers for the charts.
pub(super) fn charts_view(charts: &[ReportChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for the charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[ReportChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Cents to reais for chart values.
fn to_reais(cents: impl Into<i128>) -> f64 {
    cents.into() as f64 / 100.0
}

fn category_chart(report: &Report) -> Chart {
    let data: Vec<DataPointItem> = report
        .expenses_by_category
        .iter()
        .map(|category| DataPointItem::new(to_reais(category.total)).name(category.name.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Expenses by Category").left("center"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().orient(Orient::Vertical).left("left"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius("50%")
                .data(data)
                .emphasis(
                    Emphasis::new().item_style(
                        ItemStyle::new()
                            .shadow_blur(10)
                            .shadow_offset_x(0)
                            .shadow_color("rgba(0, 0, 0, 0.5)"),
                    ),
                ),
        )
}

fn income_expense_chart(report: &Report) -> Chart {
    Chart::new()
        .title(Title::new().text("Income vs Expenses").left("center"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("8%"))
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(vec!["Total"]))
        .y_axis(currency_axis())
        .series(
            Bar::new()
                .name("Income")
                .item_style(ItemStyle::new().color(INCOME_COLOR))
                .data(vec![to_reais(report.totals.total_income)]),
        )
        .series(
            Bar::new()
                .name("Expenses")
                .item_style(ItemStyle::new().color(EXPENSE_COLOR))
                .data(vec![to_reais(report.totals.total_expense)]),
        )
}

fn monthly_chart(report: &Report) -> Chart {
    let labels: Vec<String> = report
        .monthly
        .iter()
        .map(|month| month.month.to_string())
        .collect();
    let incomes: Vec<f64> = report.monthly.iter().map(|month| to_reais(month.income)).collect();
    let expenses: Vec<f64> = report.monthly.iter().map(|month| to_reais(month.expense)).collect();
    let balances: Vec<f64> = report.monthly.iter().map(|month| to_reais(month.balance)).collect();

    Chart::new()
        .title(Title::new().text("Monthly Evolution").left("center"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("8%"))
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(currency_axis())
        .series(
            Line::new()
                .name("Income")
                .item_style(ItemStyle::new().color(INCOME_COLOR))
                .data(incomes),
        )
        .series(
            Line::new()
                .name("Expenses")
                .item_style(ItemStyle::new().color(EXPENSE_COLOR))
                .data(expenses),
        )
        .series(
            Line::new()
                .name("Balance")
                .item_style(ItemStyle::new().color(BALANCE_COLOR))
                .data(balances),
        )
}

fn default_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .top(80)
        .contain_label(true)
}

fn currency_axis() -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .axis_label(AxisLabel::new().formatter(currency_formatter()))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
