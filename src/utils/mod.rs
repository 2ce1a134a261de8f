pub mod script_constants;

pub use script_constants::ScriptConstants;

/// 旁白的合成角色ID
pub const NARRATOR_ID: &str = "narrator";

/// 检查文本中是否含有字母（任意语言），纯省略号、标点不算
pub fn contains_letters(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// HTML实体转义，引号使用数字实体
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
