pub mod chat;
pub mod error;
pub mod prompts;
pub mod quote;
pub mod recipe;
pub mod stock;

pub use chat::{ChatClient, ChatRequest};
pub use error::{ChatError, StockError};
pub use quote::QuoteService;
pub use recipe::{parse_recipe, ParsedRecipe, RecipeService};
pub use stock::{StockQuote, StockService};
