//! Prompt templates for the chat-backed services.

pub const CHEF_SYSTEM: &str =
    "당신은 전문 요리사입니다. 정확하고 따라하기 쉬운 레시피를 제공합니다.";

pub const REVIEWER_SYSTEM: &str =
    "당신은 레시피 검토 전문가입니다. 레시피를 더 완벽하고 실용적으로 만듭니다.";

pub const PHILOSOPHER_SYSTEM: &str =
    "당신은 지혜로운 철학자이자 작가입니다. 사람들에게 영감을 주는 깊이 있는 명언을 제공합니다.";

/// First pass: a complete recipe in a fixed layout
pub fn recipe_draft(dish: &str) -> String {
    format!(
        "'{dish}' 요리의 레시피를 한국어로 작성해주세요.

다음 형식으로 작성해주세요:
🍳 [음식명] 레시피

📊 영양 정보 (1인분당)
• 칼로리: [칼로리]kcal
• 단백질: [단백질]g
• 지방: [지방]g
• 탄수화물: [탄수화물]g

🥘 재료 ([인분]분)
• [재료명] [양]
• [재료명] [양]
...

👩‍🍳 조리법
1. [단계별 설명]
2. [단계별 설명]
...

💡 요리 팁
• [유용한 팁]

정확하고 실용적인 레시피를 제공해주세요."
    )
}

/// Second pass: review and extend the draft
pub fn recipe_refine(draft: &str) -> String {
    format!(
        "다음 레시피를 검토하고 개선해주세요:

{draft}

개선 사항:
1. 조리 시간과 난이도 추가
2. 대체 재료 제안
3. 보관 방법 추가
4. 더 자세한 조리 팁

개선된 레시피를 제공해주세요."
    )
}

const QUOTE_LAYOUT: &str = "다음 형식으로 작성해주세요:
💫 오늘의 명언

\"[명언 내용]\"

- 작가 또는 인물명

💡 해설
[명언의 의미와 어떻게 적용할 수 있는지 간단히 설명]

한국어로 작성하고, 실제 존재하는 명언이거나 그와 비슷한 수준의 깊이 있는 내용으로 만들어주세요.";

/// Quote prompt; a blank theme asks for a general quote of the day
pub fn quote(theme: &str) -> String {
    let theme = theme.trim();
    if theme.is_empty() {
        format!(
            "오늘 하루를 시작하거나 마무리할 때 도움이 되는 감동적이고 의미있는 명언을 만들어주세요.\n\n{QUOTE_LAYOUT}"
        )
    } else {
        format!("'{theme}'와 관련된 의미있고 감동적인 명언을 만들어주세요.\n\n{QUOTE_LAYOUT}")
    }
}
