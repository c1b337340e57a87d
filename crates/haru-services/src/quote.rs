use rand::seq::SliceRandom;

use crate::chat::{ChatClient, ChatRequest};
use crate::prompts;

struct SampleQuote {
    text: &'static str,
    author: &'static str,
    meaning: &'static str,
}

const SAMPLE_QUOTES: [SampleQuote; 3] = [
    SampleQuote {
        text: "성공은 최종 목적지가 아니라 여행하는 과정이다.",
        author: "아리스토텔레스",
        meaning: "결과보다는 과정에서 배우고 성장하는 것이 진정한 성공의 의미입니다.",
    },
    SampleQuote {
        text: "어제는 역사가 되었고, 내일은 신비로우며, 오늘은 선물이다.",
        author: "엘리너 루스벨트",
        meaning: "과거에 얽매이거나 미래를 걱정하기보다는 현재에 집중하며 살아가는 것이 중요합니다.",
    },
    SampleQuote {
        text: "자신의 한계를 뛰어넘는 것은 타인과의 경쟁이 아닌 어제의 나와의 경쟁이다.",
        author: "괴테",
        meaning: "다른 사람과 비교하기보다는 어제의 자신보다 나은 사람이 되기 위해 노력하는 것이 진정한 성장입니다.",
    },
];

fn sample_quote() -> String {
    let quote = SAMPLE_QUOTES
        .choose(&mut rand::thread_rng())
        .unwrap_or(&SAMPLE_QUOTES[0]);

    format!(
        "💫 오늘의 명언\n\n⚠️ OpenAI API 키가 설정되지 않았습니다.\n기본 명언을 제공합니다.\n\n\"{}\"\n\n- {}\n\n💡 해설\n{}\n\n📝 더 다양한 명언을 원하시면 OpenAI API 키를 설정해주세요!",
        quote.text, quote.author, quote.meaning
    )
}

/// Quotes of the day, generated or drawn from a small built-in set
#[derive(Debug, Clone)]
pub struct QuoteService {
    chat: Option<ChatClient>,
}

impl QuoteService {
    pub fn new(chat: Option<ChatClient>) -> Self {
        Self { chat }
    }

    /// A quote on `theme`, or a general one when the theme is blank
    pub async fn quote(&self, theme: &str) -> String {
        let Some(chat) = &self.chat else {
            return sample_quote();
        };

        let request = ChatRequest {
            system: prompts::PHILOSOPHER_SYSTEM.to_string(),
            prompt: prompts::quote(theme),
            max_tokens: 500,
            temperature: 0.8,
        };

        match chat.complete(&request).await {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!("Quote generation failed: {}", e);
                format!(
                    "💫 명언 서비스\n\n❌ OpenAI API 오류: {}\n\n💡 API 키를 확인하고 다시 시도해주세요.",
                    e
                )
            }
        }
    }
}
