//! The lookup categories offered on the form.

/// A lookup category, identified on the form by its Korean label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Weather,
    Transit,
    Recipe,
    Stock,
    Quote,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Weather,
        Category::Transit,
        Category::Recipe,
        Category::Stock,
        Category::Quote,
    ];

    /// Label shown in the form and submitted as the `category` field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weather => "날씨",
            Self::Transit => "교통",
            Self::Recipe => "레시피",
            Self::Stock => "주가",
            Self::Quote => "명언",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Transit takes a departure/destination pair instead of a keyword.
    pub fn requires_route(&self) -> bool {
        matches!(self, Self::Transit)
    }

    /// Environment variable holding the provider key this category needs.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::Weather => "KMA_API_KEY",
            Self::Transit => "KAKAO_API_KEY",
            Self::Stock => "STOCK_API_KEY",
            Self::Recipe | Self::Quote => "OPENAI_API_KEY",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
