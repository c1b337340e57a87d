//! Routes a category and its input to the matching service.

use haru_core::{AppError, Category, Config, ConfigError};
use haru_maps::TransitService;
use haru_services::{ChatClient, QuoteService, RecipeService, StockService};
use haru_weather::WeatherService;

pub const UNSUPPORTED_CATEGORY: &str = "지원하지 않는 카테고리입니다.";

/// What the user typed for one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query<'a> {
    Keyword(&'a str),
    Route {
        departure: &'a str,
        destination: &'a str,
    },
}

/// One instance of each service, shared by every request
#[derive(Debug, Clone)]
pub struct Dispatcher {
    weather: WeatherService,
    transit: TransitService,
    recipe: RecipeService,
    stock: StockService,
    quote: QuoteService,
}

fn service_error(e: impl std::fmt::Display) -> AppError {
    AppError::Service(e.to_string())
}

impl Dispatcher {
    /// Build every service from `config`; an invalid config is rejected up front
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        let keys = &config.api_keys;
        let endpoints = &config.endpoints;
        let owned = |category: Category| keys.for_category(category).map(str::to_string);

        let chat = owned(Category::Recipe)
            .map(|key| ChatClient::with_base_url(key, &endpoints.openai_url, &config.llm.model))
            .transpose()
            .map_err(service_error)?;

        let dispatcher = Self {
            weather: WeatherService::with_base_url(owned(Category::Weather), &endpoints.kma_url)
                .map_err(service_error)?,
            transit: TransitService::new(owned(Category::Transit), &endpoints.kakao_url)
                .map_err(service_error)?,
            recipe: RecipeService::new(chat.clone()),
            stock: StockService::with_base_url(owned(Category::Stock), &endpoints.stock_url)
                .map_err(service_error)?,
            quote: QuoteService::new(chat),
        };

        for category in Category::ALL {
            if keys.for_category(category).is_none() {
                tracing::info!("{} service running without an API key", category);
            }
        }

        Ok(dispatcher)
    }

    pub async fn dispatch(&self, category: Category, query: Query<'_>) -> String {
        tracing::debug!("Dispatching {} request", category);

        match (category, query) {
            (Category::Weather, Query::Keyword(location)) => self.weather.report(location).await,
            (
                Category::Transit,
                Query::Route {
                    departure,
                    destination,
                },
            ) => self.transit.directions(departure, destination).await,
            (Category::Recipe, Query::Keyword(dish)) => self.recipe.recipe(dish).await,
            (Category::Stock, Query::Keyword(name)) => self.stock.report(name).await,
            (Category::Quote, Query::Keyword(theme)) => self.quote.quote(theme).await,
            _ => UNSUPPORTED_CATEGORY.to_string(),
        }
    }
}
