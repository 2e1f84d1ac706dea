use orgchart_renderer::{Config, PagePreset, render_document_svg};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrgChartRenderOptions {
    preset: Option<String>,
    font_family: Option<String>,
    show_header: Option<bool>,
    fast_text: Option<bool>,
}

fn build_config(options: OrgChartRenderOptions) -> Result<Config, String> {
    let mut config = Config::default();
    // no system fonts to measure with in the browser
    config.render.fast_text_metrics = options.fast_text.unwrap_or(true);

    if let Some(token) = options.preset.as_deref() {
        config.chart.preset =
            PagePreset::from_token(token).ok_or_else(|| format!("unknown preset `{token}`"))?;
    }
    if let Some(font_family) = options.font_family {
        config.theme.font_family = font_family;
    }
    if let Some(show_header) = options.show_header {
        config.chart.show_header = show_header;
    }
    Ok(config)
}

#[wasm_bindgen]
pub fn render_org_chart_svg(
    document_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<OrgChartRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        OrgChartRenderOptions::default()
    };

    let config = build_config(options).map_err(|error| JsValue::from_str(&error))?;
    render_document_svg(document_json, &config).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use orgchart_renderer::render_document_svg;

    use crate::{OrgChartRenderOptions, build_config};

    #[test]
    fn renders_top_box_with_departments() {
        let document = r##"{
            "global_styles": {"box_styles": {"top": {"background_color": "#1F3864", "text_color": "#FFFFFF"}}},
            "organizational_structure": {
                "level_1_top_management": {
                    "position": {"x": 500, "y": 20, "width": 200, "height": 40},
                    "style": "top", "content": {"line_1": {"text": "Director"}}
                },
                "level_2_departments": [
                    {"position": {"x": 200, "y": 120, "width": 160, "height": 36},
                     "style": "top", "content": [{"line": "Finance"}]},
                    {"position": {"x": 800, "y": 120, "width": 160, "height": 36},
                     "style": "top", "content": [{"line": "Projects"}]}
                ]
            }
        }"##;

        let config = build_config(OrgChartRenderOptions::default()).expect("config");
        let svg = render_document_svg(document, &config).expect("chart should render");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Director"));
        assert_eq!(svg.matches("<line ").count(), 4);
    }

    #[test]
    fn rejects_unknown_preset() {
        let options = OrgChartRenderOptions {
            preset: Some("letter".to_string()),
            ..OrgChartRenderOptions::default()
        };
        assert!(build_config(options).is_err());
    }
}
