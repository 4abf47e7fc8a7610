//! Placeholder "AI capability" backends.
//!
//! Each call waits for the configured latency and returns a fixed payload.
//! Inputs are read only to echo a few derived facts and the caller's options back.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::sleep;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub(crate) struct TextAnalysisInput {
    pub(crate) text: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub(crate) options: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub(crate) struct ForecastInput {
    #[schema(value_type = Object)]
    pub(crate) data: Value,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub(crate) options: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub(crate) struct ImageAnalysisInput {
    #[serde(rename = "imageUrl")]
    pub(crate) image_url: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub(crate) options: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct ScoredLabel {
    pub(crate) label: &'static str,
    pub(crate) score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct Entity {
    pub(crate) text: &'static str,
    pub(crate) kind: &'static str,
    pub(crate) confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct TextAnalysis {
    pub(crate) sentiment: ScoredLabel,
    pub(crate) entities: Vec<Entity>,
    pub(crate) categories: Vec<ScoredLabel>,
    pub(crate) language: &'static str,
    pub(crate) characters: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub(crate) options: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct ForecastPoint {
    pub(crate) period: &'static str,
    pub(crate) value: f64,
    pub(crate) lower: f64,
    pub(crate) upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct Forecast {
    pub(crate) model: &'static str,
    pub(crate) horizon: usize,
    pub(crate) confidence_level: f64,
    pub(crate) points: Vec<ForecastPoint>,
    pub(crate) accuracy: ForecastAccuracy,
    pub(crate) input_points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub(crate) options: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct ForecastAccuracy {
    pub(crate) mape: f64,
    pub(crate) rmse: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct DetectedObject {
    pub(crate) label: &'static str,
    pub(crate) confidence: f64,
    pub(crate) bbox: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct ImageAnalysis {
    pub(crate) image_url: String,
    pub(crate) labels: Vec<ScoredLabel>,
    pub(crate) objects: Vec<DetectedObject>,
    pub(crate) dominant_colors: Vec<&'static str>,
    pub(crate) safe_search: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub(crate) options: Option<Value>,
}

pub(crate) struct InsightService {
    latency: Duration,
}

impl InsightService {
    pub(crate) fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub(crate) async fn analyze_text(&self, input: TextAnalysisInput) -> TextAnalysis {
        self.simulate_latency("nlp").await;
        TextAnalysis {
            sentiment: ScoredLabel {
                label: "positive",
                score: 0.87,
            },
            entities: vec![
                Entity {
                    text: "product",
                    kind: "PRODUCT",
                    confidence: 0.92,
                },
                Entity {
                    text: "customer",
                    kind: "PERSON",
                    confidence: 0.78,
                },
            ],
            categories: vec![
                ScoredLabel {
                    label: "Technology",
                    score: 0.81,
                },
                ScoredLabel {
                    label: "Business",
                    score: 0.64,
                },
            ],
            language: "en",
            characters: input.text.chars().count(),
            options: input.options,
        }
    }

    pub(crate) async fn forecast(&self, input: ForecastInput) -> Forecast {
        self.simulate_latency("prediction").await;
        let points = vec![
            ForecastPoint {
                period: "2024-07",
                value: 1250.0,
                lower: 1180.0,
                upper: 1320.0,
            },
            ForecastPoint {
                period: "2024-08",
                value: 1310.0,
                lower: 1220.0,
                upper: 1400.0,
            },
            ForecastPoint {
                period: "2024-09",
                value: 1385.0,
                lower: 1270.0,
                upper: 1500.0,
            },
        ];
        Forecast {
            model: "seasonal-arima",
            horizon: points.len(),
            confidence_level: 0.95,
            points,
            accuracy: ForecastAccuracy {
                mape: 4.2,
                rmse: 38.5,
            },
            input_points: input.data.as_array().map_or(0, Vec::len),
            options: input.options,
        }
    }

    pub(crate) async fn analyze_image(&self, input: ImageAnalysisInput) -> ImageAnalysis {
        self.simulate_latency("vision").await;
        ImageAnalysis {
            image_url: input.image_url,
            labels: vec![
                ScoredLabel {
                    label: "office",
                    score: 0.94,
                },
                ScoredLabel {
                    label: "people",
                    score: 0.88,
                },
                ScoredLabel {
                    label: "technology",
                    score: 0.76,
                },
            ],
            objects: vec![
                DetectedObject {
                    label: "laptop",
                    confidence: 0.91,
                    bbox: vec![0.12, 0.40, 0.35, 0.28],
                },
                DetectedObject {
                    label: "person",
                    confidence: 0.89,
                    bbox: vec![0.55, 0.10, 0.30, 0.80],
                },
            ],
            dominant_colors: vec!["#1f2937", "#f3f4f6", "#3b82f6"],
            safe_search: "VERY_UNLIKELY",
            options: input.options,
        }
    }

    async fn simulate_latency(&self, endpoint: &'static str) {
        debug!(endpoint, latency_ms = self.latency.as_millis() as u64, "simulating inference");
        sleep(self.latency).await;
    }
}
