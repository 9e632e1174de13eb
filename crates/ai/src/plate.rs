// Food-plate image analysis, proxied to an external vision API. The
// upstream is flaky and key-gated, so a deterministic mock analysis stands
// in whenever the real reply cannot be obtained.

use serde::{Deserialize, Serialize};

const DEFAULT_HOST: &str = "ai-workout-planner-exercise-fitness-nutrition-guide.p.rapidapi.com";

/// Sample image used when the request carries no URL.
pub const DEFAULT_IMAGE_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/b/bd/Breakfast_foods.jpg";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlateNutrition {
    #[serde(default)]
    pub calories: i32,
    #[serde(default)]
    pub carbs: i32,
    #[serde(default)]
    pub protein: i32,
    #[serde(default)]
    pub fat: i32,
    #[serde(default)]
    pub sugar: i32,
    #[serde(default)]
    pub fiber: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateFoodItem {
    pub name: String,
    pub quantity: String,
    pub calories: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRecommendation {
    pub exercise: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateAnalysis {
    #[serde(default)]
    pub nutrition: PlateNutrition,
    #[serde(default)]
    pub food_items: Vec<PlateFoodItem>,
    #[serde(default)]
    pub exercise_recommendations: Vec<ExerciseRecommendation>,
}

#[derive(Debug)]
pub struct PlateOutcome {
    pub analysis: PlateAnalysis,
    /// True when the mock analysis was substituted for a real reply.
    pub mocked: bool,
}

#[derive(Clone)]
pub struct PlateAnalyzer {
    http: reqwest::Client,
    api_key: Option<String>,
    host: String,
}

impl PlateAnalyzer {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            host: DEFAULT_HOST.to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("RAPIDAPI_KEY").ok())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn analyze(&self, image_url: &str) -> PlateOutcome {
        let Some(api_key) = &self.api_key else {
            tracing::warn!("plate analyzer key not configured, returning mock analysis");
            return PlateOutcome {
                analysis: mock_analysis(),
                mocked: true,
            };
        };

        let url = format!("https://{}/analyzeFoodPlate", self.host);
        let response = self
            .http
            .post(&url)
            .query(&[
                ("imageUrl", image_url),
                ("lang", "en"),
                ("noqueue", "1"),
            ])
            .header("x-rapidapi-host", &self.host)
            .header("x-rapidapi-key", api_key)
            .send()
            .await;

        match response {
            Ok(reply) => match reply.json::<PlateAnalysis>().await {
                Ok(analysis) => PlateOutcome {
                    analysis,
                    mocked: false,
                },
                Err(err) => {
                    tracing::warn!(error = %err, "plate analyzer reply was not parseable");
                    PlateOutcome {
                        analysis: mock_analysis(),
                        mocked: true,
                    }
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "plate analyzer call failed");
                PlateOutcome {
                    analysis: mock_analysis(),
                    mocked: true,
                }
            }
        }
    }
}

fn mock_analysis() -> PlateAnalysis {
    PlateAnalysis {
        nutrition: PlateNutrition {
            calories: 750,
            carbs: 45,
            protein: 30,
            fat: 40,
            sugar: 15,
            fiber: 8,
        },
        food_items: vec![
            PlateFoodItem {
                name: "Pancakes".to_string(),
                quantity: "2 medium".to_string(),
                calories: 400,
            },
            PlateFoodItem {
                name: "Butter".to_string(),
                quantity: "2 tbsp".to_string(),
                calories: 200,
            },
            PlateFoodItem {
                name: "Maple Syrup".to_string(),
                quantity: "3 tbsp".to_string(),
                calories: 150,
            },
        ],
        exercise_recommendations: vec![
            ExerciseRecommendation {
                exercise: "Walking (3.5 mph)".to_string(),
                time: "90 min".to_string(),
            },
            ExerciseRecommendation {
                exercise: "Jogging (5 mph)".to_string(),
                time: "45 min".to_string(),
            },
            ExerciseRecommendation {
                exercise: "Cycling (12-14 mph)".to_string(),
                time: "60 min".to_string(),
            },
            ExerciseRecommendation {
                exercise: "Swimming (freestyle)".to_string(),
                time: "50 min".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_yields_mock() {
        let analyzer = PlateAnalyzer::new(None);
        let outcome = analyzer.analyze(DEFAULT_IMAGE_URL).await;
        assert!(outcome.mocked);
        assert_eq!(outcome.analysis.nutrition.calories, 750);
        assert_eq!(outcome.analysis.food_items.len(), 3);
    }

    #[test]
    fn test_analysis_tolerates_sparse_upstream_json() {
        // Upstream replies vary; unknown shapes must still deserialize.
        let analysis: PlateAnalysis = serde_json::from_str(r#"{"nutrition": {"calories": 500}}"#)
            .expect("sparse analysis should deserialize");
        assert_eq!(analysis.nutrition.calories, 500);
        assert!(analysis.food_items.is_empty());
    }
}
