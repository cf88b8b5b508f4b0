//! JavaScript interop for the carousel plugin.
//! Provides Rust bindings to the helper defined in carousel_helpers.js and
//! the typed configuration objects it consumes.

use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/carousel_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = initCarousel)]
    fn init_carousel_js(selector: &str, config: JsValue);
}

/// Settings override applied when the viewport is at most `breakpoint`
/// pixels wide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveRule {
    pub breakpoint: u32,
    pub settings: CarouselSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselSettings {
    pub slides_to_show: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_padding: Option<String>,
}

/// Configuration handed to the carousel plugin. Fields serialize to the
/// plugin's camelCase option names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselConfig {
    pub slides_to_show: u32,
    pub slides_to_scroll: u32,
    pub center_mode: bool,
    pub center_padding: String,
    pub infinite: bool,
    pub dots: bool,
    pub accessibility: bool,
    pub responsive: Vec<ResponsiveRule>,
}

/// Stock configuration for the featured-managers carousel.
pub fn managers_carousel() -> CarouselConfig {
    CarouselConfig {
        slides_to_show: 5,
        slides_to_scroll: 1,
        center_mode: true,
        center_padding: "5rem".to_string(),
        infinite: true,
        dots: true,
        accessibility: false,
        responsive: vec![
            ResponsiveRule {
                breakpoint: 1350,
                settings: CarouselSettings {
                    slides_to_show: 3,
                    center_padding: None,
                },
            },
            ResponsiveRule {
                breakpoint: 900,
                settings: CarouselSettings {
                    slides_to_show: 1,
                    center_padding: Some("10rem".to_string()),
                },
            },
            ResponsiveRule {
                breakpoint: 600,
                settings: CarouselSettings {
                    slides_to_show: 1,
                    center_padding: Some("5rem".to_string()),
                },
            },
        ],
    }
}

/// Stock configuration for the featured-projects carousel.
pub fn projects_carousel() -> CarouselConfig {
    CarouselConfig {
        slides_to_show: 5,
        slides_to_scroll: 3,
        center_mode: true,
        center_padding: "10rem".to_string(),
        infinite: true,
        dots: true,
        accessibility: false,
        responsive: vec![
            ResponsiveRule {
                breakpoint: 1350,
                settings: CarouselSettings {
                    slides_to_show: 1,
                    center_padding: Some("20rem".to_string()),
                },
            },
            ResponsiveRule {
                breakpoint: 900,
                settings: CarouselSettings {
                    slides_to_show: 1,
                    center_padding: Some("15rem".to_string()),
                },
            },
            ResponsiveRule {
                breakpoint: 600,
                settings: CarouselSettings {
                    slides_to_show: 1,
                    center_padding: Some("5rem".to_string()),
                },
            },
        ],
    }
}

/// Hand a carousel configuration to the plugin for the given selector.
pub fn init_carousel(selector: &str, config: &CarouselConfig) {
    match serde_wasm_bindgen::to_value(config) {
        Ok(js_config) => init_carousel_js(selector, js_config),
        Err(e) => warn!("Failed to serialize carousel config for '{}': {}", selector, e),
    }
}
