//! Form submission handling.

use haru_core::Category;
use haru_services::{parse_recipe, ParsedRecipe};
use serde::Deserialize;

use crate::dispatch::{Dispatcher, Query, UNSUPPORTED_CATEGORY};

/// Raw urlencoded form fields; any of them may be absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub departure: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

fn trimmed(field: &Option<String>) -> String {
    field.as_deref().unwrap_or_default().trim().to_string()
}

/// Everything the page needs to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    /// Selected category label as submitted, which may not be a known one
    pub selected: Option<String>,
    pub keyword: String,
    pub departure: String,
    pub destination: String,
    pub result: Option<String>,
    pub recipe: Option<ParsedRecipe>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            selected: Some(Category::default().label().to_string()),
            keyword: String::new(),
            departure: String::new(),
            destination: String::new(),
            result: None,
            recipe: None,
        }
    }
}

impl PageState {
    pub fn selected_category(&self) -> Option<Category> {
        self.selected.as_deref().and_then(Category::from_label)
    }

    /// Validate a submission, run it and collect what to show.
    ///
    /// Route categories need both endpoints; every other category needs a
    /// keyword. Missing input redisplays the form without a result. Only the
    /// fields relevant to the chosen category are echoed back.
    pub async fn from_submission(dispatcher: &Dispatcher, input: &FormInput) -> Self {
        let category = input.category.as_deref().and_then(Category::from_label);
        let mut state = Self {
            selected: input.category.clone(),
            ..Self::default()
        };

        if category.is_some_and(|c| c.requires_route()) {
            state.departure = trimmed(&input.departure);
            state.destination = trimmed(&input.destination);
            if state.departure.is_empty() || state.destination.is_empty() {
                return state;
            }
        } else {
            state.keyword = trimmed(&input.keyword);
            if state.keyword.is_empty() {
                return state;
            }
        }

        let Some(category) = category else {
            tracing::debug!("Unsupported category {:?}", input.category);
            state.result = Some(UNSUPPORTED_CATEGORY.to_string());
            return state;
        };

        let query = if category.requires_route() {
            Query::Route {
                departure: &state.departure,
                destination: &state.destination,
            }
        } else {
            Query::Keyword(&state.keyword)
        };

        let result = dispatcher.dispatch(category, query).await;
        if category == Category::Recipe {
            state.recipe = Some(parse_recipe(&result));
        }
        state.result = Some(result);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haru_core::Config;

    fn input(category: &str, keyword: &str, departure: &str, destination: &str) -> FormInput {
        FormInput {
            category: Some(category.into()),
            keyword: Some(keyword.into()),
            departure: Some(departure.into()),
            destination: Some(destination.into()),
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn test_default_state() {
        let state = PageState::default();
        assert_eq!(state.selected_category(), Some(Category::Weather));
        assert!(state.result.is_none());
    }

    #[tokio::test]
    async fn test_transit_needs_both_endpoints() {
        let state = PageState::from_submission(&dispatcher(), &input("교통", "ignored", " 강남역 ", "")).await;
        assert_eq!(state.departure, "강남역");
        assert_eq!(state.keyword, "");
        assert!(state.result.is_none());
    }

    #[tokio::test]
    async fn test_keyword_is_trimmed_and_route_not_echoed() {
        let state = PageState::from_submission(&dispatcher(), &input("주가", "  애플 ", "a", "b")).await;
        assert_eq!(state.keyword, "애플");
        assert_eq!(state.departure, "");
        assert_eq!(state.destination, "");
        assert_eq!(
            state.result.as_deref(),
            Some("공공데이터포털 API 키가 설정되지 않았습니다.")
        );
    }

    #[tokio::test]
    async fn test_unknown_category() {
        let state = PageState::from_submission(&dispatcher(), &input("운세", "오늘", "", "")).await;
        assert_eq!(state.selected.as_deref(), Some("운세"));
        assert_eq!(state.result.as_deref(), Some(UNSUPPORTED_CATEGORY));

        let empty = PageState::from_submission(&dispatcher(), &input("운세", " ", "", "")).await;
        assert!(empty.result.is_none());
    }

    #[tokio::test]
    async fn test_recipe_result_is_parsed() {
        let state = PageState::from_submission(&dispatcher(), &input("레시피", "김치찌개", "", "")).await;
        let recipe = state.recipe.unwrap();
        assert!(recipe.steps.is_empty());
        assert_eq!(Some(recipe.ingredients), state.result);
    }
}
