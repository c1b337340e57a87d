//! Two-pass recipe generation and splitting of the result for display.

use regex::Regex;
use std::sync::OnceLock;

use crate::chat::{ChatClient, ChatRequest};
use crate::error::ChatError;
use crate::prompts;

/// Marker separating ingredients from numbered steps
pub const STEPS_MARKER: &str = "[조리법]";

/// Recipe text split into an ingredients block and individual steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecipe {
    pub ingredients: String,
    pub steps: Vec<String>,
}

// Constant pattern, checked by the parse tests
#[allow(clippy::expect_used)]
fn step_separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"\d+\.|\n").expect("step separator pattern is valid"))
}

/// Split recipe text at the first `[조리법]` marker.
///
/// The text after the marker (up to any second marker) is cut at step
/// numbers (`1.`) and line breaks. Without a marker the whole text is the
/// ingredients block and there are no steps.
pub fn parse_recipe(text: &str) -> ParsedRecipe {
    let mut parts = text.split(STEPS_MARKER);
    let head = parts.next().unwrap_or_default();

    match parts.next() {
        Some(body) => ParsedRecipe {
            ingredients: head.trim().to_string(),
            steps: step_separator()
                .split(body)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        },
        None => ParsedRecipe {
            ingredients: text.to_string(),
            steps: Vec::new(),
        },
    }
}

/// Recipes drafted by one completion and refined by a second
#[derive(Debug, Clone)]
pub struct RecipeService {
    chat: Option<ChatClient>,
}

impl RecipeService {
    pub fn new(chat: Option<ChatClient>) -> Self {
        Self { chat }
    }

    pub async fn recipe(&self, dish: &str) -> String {
        let Some(chat) = &self.chat else {
            return format!(
                "🍳 {} 레시피\n\n⚠️ OpenAI API 키가 설정되지 않았습니다.\n📝 OpenAI API 키 설정: 환경변수 OPENAI_API_KEY에 키 입력",
                dish
            );
        };

        match self.generate(chat, dish).await {
            Ok(recipe) => recipe,
            Err(e) => {
                tracing::warn!("Recipe generation for '{}' failed: {}", dish, e);
                format!(
                    "🍳 {} 레시피\n\n❌ OpenAI API 오류: {}\n\n💡 API 키를 확인하고 다시 시도해주세요.",
                    dish, e
                )
            }
        }
    }

    async fn generate(&self, chat: &ChatClient, dish: &str) -> Result<String, ChatError> {
        let draft = chat
            .complete(&ChatRequest {
                system: prompts::CHEF_SYSTEM.to_string(),
                prompt: prompts::recipe_draft(dish),
                max_tokens: 1000,
                temperature: 0.7,
            })
            .await?;

        tracing::debug!("Recipe draft ready, refining");

        chat.complete(&ChatRequest {
            system: prompts::REVIEWER_SYSTEM.to_string(),
            prompt: prompts::recipe_refine(&draft),
            max_tokens: 1200,
            temperature: 0.5,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_separator_matches_numbers_and_newlines() {
        let separator = step_separator();
        assert!(separator.is_match("12."));
        assert!(separator.is_match("\n"));
        assert!(!separator.is_match("볶는다"));
    }

    #[test]
    fn test_parse_with_marker() {
        let parsed = parse_recipe("재료: 김치, 돼지고기\n[조리법]\n1. 김치를 볶는다\n2. 물을 붓는다\n3. 끓인다");
        assert_eq!(parsed.ingredients, "재료: 김치, 돼지고기");
        assert_eq!(parsed.steps, vec!["김치를 볶는다", "물을 붓는다", "끓인다"]);
    }

    #[test]
    fn test_parse_inline_numbers() {
        let parsed = parse_recipe("두부 1모 [조리법] 1. 자른다 2. 굽는다");
        assert_eq!(parsed.ingredients, "두부 1모");
        assert_eq!(parsed.steps, vec!["자른다", "굽는다"]);
    }

    #[test]
    fn test_parse_without_marker() {
        let text = "🍳 김치찌개 레시피\n\n👩‍🍳 조리법\n1. 볶기";
        let parsed = parse_recipe(text);
        assert_eq!(parsed.ingredients, text);
        assert!(parsed.steps.is_empty());
    }

    #[test]
    fn test_parse_ignores_text_after_second_marker() {
        let parsed = parse_recipe("a[조리법]1. one[조리법]2. two");
        assert_eq!(parsed.steps, vec!["one"]);
    }

    #[test]
    fn test_decimal_amounts_are_split_too() {
        // Numbers followed by a dot split steps, whatever they mean
        let parsed = parse_recipe("x[조리법]1. 설탕 1.5큰술 넣기");
        assert_eq!(parsed.steps, vec!["설탕", "5큰술 넣기"]);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let service = RecipeService::new(None);
        let text = service.recipe("김치찌개").await;
        assert!(text.starts_with("🍳 김치찌개 레시피\n\n⚠️ OpenAI API 키가 설정되지 않았습니다."));
    }
}
