//! Self-contained HTML page with the radar chart and its dropdown filters.
//!
//! The Plotly figure is embedded as JSON; a small inline script toggles trace
//! visibility from each trace's `meta` when a dropdown changes. Output is
//! deterministic: the same series produce identical bytes.

use crate::chart::palette::DIET_STYLES;
use crate::chart::{ChartMetadata, RadarSeries};
use anyhow::Result;
use serde::Serialize;
use serde_json::{Value, json};

pub const DEFAULT_PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const PAGE_TITLE: &str = "Environmental Impact by Diet Group";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// URL or relative path of the Plotly bundle.
    pub plotly_src: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            plotly_src: DEFAULT_PLOTLY_SRC.to_string(),
        }
    }
}

/// Everything the page needs.
pub struct ChartPage<'a> {
    pub metadata: &'a ChartMetadata,
    pub series: &'a [RadarSeries],
}

#[derive(Serialize)]
struct TraceLine<'a> {
    width: u8,
    color: &'a str,
}

#[derive(Serialize)]
struct TraceMeta<'a> {
    sex: &'a str,
    age_group: &'a str,
}

/// One Plotly `scatterpolar` trace.
#[derive(Serialize)]
struct PolarTrace<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    r: &'a [f64],
    theta: &'a [&'static str],
    fill: &'static str,
    fillcolor: &'a str,
    name: &'a str,
    visible: bool,
    line: TraceLine<'a>,
    opacity: f64,
    hovertemplate: String,
    meta: TraceMeta<'a>,
}

impl<'a> PolarTrace<'a> {
    fn from_series(s: &'a RadarSeries) -> Self {
        Self {
            kind: "scatterpolar",
            r: &s.r,
            theta: &s.theta,
            fill: "toself",
            fillcolor: &s.style.fill_color,
            name: &s.style.display_name,
            visible: s.visible,
            line: TraceLine {
                width: 3,
                color: &s.style.line_color,
            },
            opacity: 0.8,
            hovertemplate: format!(
                "{}<br>%{{theta}}: %{{r:.3f}}<extra>({}, {})</extra>",
                html_escape(&s.style.display_name),
                html_escape(&s.sex),
                html_escape(&s.age_group)
            ),
            meta: TraceMeta {
                sex: &s.sex,
                age_group: &s.age_group,
            },
        }
    }
}

fn chart_title(sex: &str, age_group: &str) -> String {
    format!("{PAGE_TITLE} ({sex}, {age_group})")
}

fn figure_layout(metadata: &ChartMetadata) -> Value {
    let white = "#ffffff";
    json!({
        "title": {
            "text": chart_title(&metadata.default_sex, &metadata.default_age),
            "x": 0.5,
            "xanchor": "center",
            "font": { "size": 22, "family": "Arial", "color": white }
        },
        "template": "plotly_dark",
        "font": { "family": "Arial", "size": 14, "color": white },
        "polar": {
            "bgcolor": "rgba(50, 50, 50, 0.8)",
            "radialaxis": {
                "visible": true,
                "range": [0, 1],
                "showline": true,
                "linewidth": 1,
                "gridcolor": "#777",
                "tickfont": { "size": 12, "color": white }
            },
            "angularaxis": {
                "showline": true,
                "linewidth": 1,
                "gridcolor": "#777",
                "tickfont": { "size": 14, "color": white, "weight": "bold" }
            }
        },
        "legend": {
            "orientation": "v",
            "yanchor": "top",
            "y": 1,
            "xanchor": "right",
            "x": 1.2,
            "font": { "size": 14, "color": white },
            "bgcolor": "rgba(0, 0, 0, 0.6)",
            "bordercolor": white,
            "borderwidth": 1,
            "title": {
                "text": "Diet Groups",
                "font": { "size": 16, "color": white, "family": "Arial Bold" }
            }
        },
        "margin": { "l": 20, "r": 150, "t": 120, "b": 80 },
        "showlegend": true,
        "hovermode": "closest",
        "dragmode": "pan",
        "paper_bgcolor": "#222",
        "plot_bgcolor": "#222"
    })
}

/// Serializes the Plotly figure (`{"data": [...], "layout": {...}}`).
pub fn figure_json(page: &ChartPage<'_>) -> Result<String> {
    let data: Vec<PolarTrace<'_>> = page.series.iter().map(PolarTrace::from_series).collect();
    let figure = json!({
        "data": data,
        "layout": figure_layout(page.metadata),
    });
    Ok(serde_json::to_string(&figure)?)
}

fn render_options(options: &[String], selected: &str) -> String {
    options
        .iter()
        .map(|o| {
            let attr = if o == selected { " selected" } else { "" };
            format!(
                "<option value=\"{v}\"{attr}>{v}</option>",
                v = html_escape(o)
            )
        })
        .collect::<Vec<_>>()
        .join("\n                    ")
}

fn render_legend_note() -> String {
    let swatches = DIET_STYLES
        .iter()
        .map(|s| {
            format!(
                "<span class=\"diet-color\" style=\"background-color: {};\"></span> {}",
                html_escape(s.color),
                html_escape(s.display_name)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "<p><strong>About this visualization:</strong> This radar chart shows the environmental \
impact of different diet groups across multiple sustainability metrics. Each diet is represented \
by a unique color: {swatches}. Lower values (closer to center) indicate less environmental \
impact.</p>"
    )
}

/// Renders the complete HTML document.
pub fn render_html(page: &ChartPage<'_>, opts: &RenderOptions) -> Result<String> {
    let figure = figure_json(page)?;
    let meta = page.metadata;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{plotly_src}"></script>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{title}</h1>
            <p>Analysis of different dietary choices and their environmental footprints</p>
        </div>

        <div class="filter-controls highlight" id="filter-controls">
            <div class="control-group">
                <div class="control-label">SELECT GENDER</div>
                <select id="sex-select">
                    {sex_options}
                </select>
            </div>

            <div class="control-group">
                <div class="control-label">SELECT AGE GROUP</div>
                <select id="age-select">
                    {age_options}
                </select>
            </div>
        </div>

        <div id="plotly-div"></div>

        <div class="legend-note">
            {legend_note}
        </div>

        <div class="footer">
            Created with Plotly &bull; Environmental Impact Analysis &bull; Data normalized for comparison
        </div>
    </div>

    <script type="application/json" id="figure-data">{figure}</script>
    <script>{js}</script>
</body>
</html>
"#,
        title = PAGE_TITLE,
        plotly_src = html_escape(&opts.plotly_src),
        css = INLINE_CSS,
        sex_options = render_options(&meta.sex_options, &meta.default_sex),
        age_options = render_options(&meta.age_options, &meta.default_age),
        legend_note = render_legend_note(),
        figure = escape_script_json(&figure),
        js = INLINE_JS,
    ))
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keeps embedded JSON from closing its `<script>` element.
fn escape_script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

const INLINE_CSS: &str = r#"
        body {
            margin: 0;
            padding: 0;
            background-color: #151515;
            color: white;
            font-family: 'Segoe UI', Arial, sans-serif;
        }
        .container {
            width: 100%;
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
            box-sizing: border-box;
            position: relative;
        }
        .header {
            text-align: center;
            padding: 20px 0;
            margin-bottom: 30px;
            border-bottom: 1px solid #444;
        }
        .header h1 { font-size: 28px; margin: 0; color: #f0f0f0; }
        .header p { font-size: 16px; margin: 10px 0 0; color: #aaa; }
        #plotly-div {
            width: 100%;
            height: 700px;
            border-radius: 8px;
            overflow: hidden;
            box-shadow: 0 4px 20px rgba(0, 0, 0, 0.3);
            margin-bottom: 30px;
        }
        .filter-controls {
            background-color: rgba(20, 20, 20, 0.9);
            padding: 15px;
            border-radius: 10px;
            box-shadow: 0 0 15px rgba(0, 0, 0, 0.5);
            margin-bottom: 20px;
            border: 2px solid #3080e8;
            display: flex;
            justify-content: center;
            gap: 30px;
            position: relative;
            z-index: 100;
        }
        .control-group { display: flex; flex-direction: column; align-items: center; }
        .control-label { font-size: 16px; font-weight: bold; margin-bottom: 8px; color: white; }
        select {
            padding: 10px 15px;
            background-color: #333;
            color: white;
            border: 2px solid #3080e8;
            border-radius: 5px;
            font-size: 16px;
            min-width: 150px;
            cursor: pointer;
            outline: none;
        }
        select:hover { background-color: #444; }
        select:focus { box-shadow: 0 0 8px rgba(48, 128, 232, 0.8); }
        .legend-note {
            margin: 20px 0;
            padding: 15px;
            background-color: rgba(0, 0, 0, 0.3);
            border-radius: 6px;
            font-size: 14px;
            line-height: 1.5;
            color: #ccc;
        }
        .diet-color {
            display: inline-block;
            width: 12px;
            height: 12px;
            margin-right: 5px;
            border-radius: 50%;
        }
        .footer {
            margin-top: 30px;
            text-align: center;
            font-size: 14px;
            color: #888;
            padding: 20px 0;
            border-top: 1px solid #444;
        }
        @keyframes highlight {
            0% { box-shadow: 0 0 5px #3080e8; }
            50% { box-shadow: 0 0 20px #3080e8; }
            100% { box-shadow: 0 0 5px #3080e8; }
        }
        .highlight { animation: highlight 2s infinite; }
"#;

const INLINE_JS: &str = r#"
        document.addEventListener('DOMContentLoaded', function () {
            const figure = JSON.parse(document.getElementById('figure-data').textContent);
            Plotly.newPlot('plotly-div', figure.data, figure.layout, { responsive: true });

            const sexSelect = document.getElementById('sex-select');
            const ageSelect = document.getElementById('age-select');
            const filterControls = document.getElementById('filter-controls');

            function updateChart() {
                const sex = sexSelect.value;
                const age = ageSelect.value;

                Plotly.relayout('plotly-div', {
                    'title.text': `Environmental Impact by Diet Group (${sex}, ${age})`
                });

                const visible = figure.data.map(trace =>
                    !!trace.meta && trace.meta.sex === sex && trace.meta.age_group === age);
                Plotly.restyle('plotly-div', { visible: visible });
            }

            sexSelect.addEventListener('change', updateChart);
            ageSelect.addEventListener('change', updateChart);

            setTimeout(() => filterControls.classList.remove('highlight'), 5000);
        });
"#;
