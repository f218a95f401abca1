//! Recommendation Service
//!
//! Builds the fitness-plan prompt and hands it to a text generator.

use std::sync::Arc;

use async_trait::async_trait;

use crate::shared::error::AppError;

/// Answer of a text-generation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Generated text
    Text(String),
    /// The backend answered successfully but produced no text
    Empty,
    /// The backend refused the request with a non-success status
    Rejected { status: u16, body: String },
}

/// Outbound text-generation backend.
///
/// Transport failures are returned as `AppError::Upstream`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Generation, AppError>;
}

/// Body measurements and goal
#[derive(Debug, Clone)]
pub struct FitnessProfile {
    pub height: String,
    pub weight: String,
    pub body_type: String,
    pub goal: String,
}

pub const EMPTY_ANSWER: &str = "No recommendation could be generated.";
pub const QUOTA_EXCEEDED: &str =
    "The recommendation service has reached its daily limit. Please try again in a few hours.";
pub const UPSTREAM_FAILED: &str = "The recommendation service could not generate content.";

#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Personalized plan text. Upstream refusals become fallback text.
    async fn recommend(&self, profile: &FitnessProfile) -> Result<String, AppError>;
}

pub struct RecommendationServiceImpl {
    generator: Arc<dyn TextGenerator>,
}

impl RecommendationServiceImpl {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

/// Prompt sent to the generator.
pub fn build_prompt(profile: &FitnessProfile) -> String {
    format!(
        r#"You are a fitness and nutrition expert. Prepare a personalized fitness plan for the following person:

Height: {height} cm
Weight: {weight} kg
Body type: {body_type}
Goal: {goal}

Please prepare a comprehensive plan covering:

## Exercise Program
1. Weekly exercise schedule (which exercises on which days)
2. Sets and repetitions for each exercise
3. Muscle groups to focus on
4. Recommended session durations

## Nutrition Plan
1. Estimated daily calorie needs
2. Macronutrient split (protein, carbohydrate, fat)
3. Sample meal suggestions
4. Water intake recommendation

## Expected Results
1. Likely changes after 3 months
2. Likely changes after 6 months
3. Motivation tips

Be detailed and realistic. Format the answer as well-structured Markdown."#,
        height = profile.height,
        weight = profile.weight,
        body_type = profile.body_type,
        goal = profile.goal,
    )
}

#[async_trait]
impl RecommendationService for RecommendationServiceImpl {
    async fn recommend(&self, profile: &FitnessProfile) -> Result<String, AppError> {
        let prompt = build_prompt(profile);

        match self.generator.generate(&prompt).await? {
            Generation::Text(text) => Ok(text),
            Generation::Empty => Ok(EMPTY_ANSWER.to_string()),
            Generation::Rejected { status, body } => {
                tracing::error!(status, body = %body, "Text generation rejected");
                if body.to_lowercase().contains("quota") {
                    Ok(QUOTA_EXCEEDED.to_string())
                } else {
                    Ok(UPSTREAM_FAILED.to_string())
                }
            }
        }
    }
}
