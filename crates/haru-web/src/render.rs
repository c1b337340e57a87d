//! HTML rendering for the single form page.

use haru_core::Category;
use std::fmt::Write;

use crate::form::PageState;

const STYLE: &str = "body{font-family:sans-serif;max-width:480px;margin:0 auto;padding:16px;background:#f7f7fb}\
h1{font-size:1.4em;text-align:center}\
form{display:flex;flex-direction:column;gap:8px}\
select,input,button{font-size:1em;padding:10px;border-radius:8px;border:1px solid #ccc}\
button{background:#4a6cf7;color:#fff;border:none}\
pre{white-space:pre-wrap;word-break:break-word;background:#fff;padding:12px;border-radius:8px}\
ol{background:#fff;padding:12px 12px 12px 32px;border-radius:8px}";

/// Escape text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn input_field(out: &mut String, name: &str, value: &str, placeholder: &str) {
    let _ = writeln!(
        out,
        r#"<input type="text" name="{name}" value="{}" placeholder="{placeholder}">"#,
        escape_html(value)
    );
}

pub fn render_page(state: &PageState) -> String {
    let selected = state.selected_category();
    let mut out = String::with_capacity(4096);

    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>하루 정보</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>🌈 하루 정보</h1>\n<form method=\"post\" action=\"/\">\n<select name=\"category\">\n"
    );

    for category in Category::ALL {
        let marker = if selected == Some(category) { " selected" } else { "" };
        let _ = writeln!(
            out,
            r#"<option value="{0}"{marker}>{0}</option>"#,
            category.label()
        );
    }
    out.push_str("</select>\n");

    if selected.is_some_and(|c| c.requires_route()) {
        input_field(&mut out, "departure", &state.departure, "출발지 (예: 강남역)");
        input_field(&mut out, "destination", &state.destination, "도착지 (예: 서울역)");
    } else {
        input_field(&mut out, "keyword", &state.keyword, "검색어를 입력하세요");
    }
    out.push_str("<button type=\"submit\">조회</button>\n</form>\n");

    match (&state.recipe, &state.result) {
        (Some(recipe), _) if !recipe.steps.is_empty() => {
            let _ = writeln!(
                out,
                "<section class=\"result\">\n<pre>{}</pre>\n<ol>",
                escape_html(&recipe.ingredients)
            );
            for step in &recipe.steps {
                let _ = writeln!(out, "<li>{}</li>", escape_html(step));
            }
            out.push_str("</ol>\n</section>\n");
        }
        (_, Some(result)) => {
            let _ = writeln!(
                out,
                "<section class=\"result\">\n<pre>{}</pre>\n</section>",
                escape_html(result)
            );
        }
        _ => {}
    }

    out.push_str("</body>\n</html>\n");
    out
}
