use crate::models::DialogueElement;
use crate::utils::script_constants::STRAY_BRACE_REGEX;

// 首尾需要去掉的定界字符
const EDGE_CHARS: &[char] = &['`', '"'];

// 转义后的双引号
const ESCAPED_QUOTE: &str = "&#34;";

fn is_edge_char(c: char) -> bool {
    c.is_whitespace() || EDGE_CHARS.contains(&c)
}

// 去掉首尾的空白、反引号和引号
fn trim_edges(text: &str) -> &str {
    text.trim_matches(is_edge_char)
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    Start,
    End,
}

/// 渲染前去掉元素树首尾文字叶子上的空白、反引号和引号
///
/// 两种渲染器共用，引号被格式标签包住时（如 `{i:"Hello"}`）也能去掉。
/// 不产生文字的元素（语音、等待、隐藏标签等）会被越过。
pub fn trim_edge_text(elements: &[DialogueElement]) -> Vec<DialogueElement> {
    let mut elements = elements.to_vec();
    trim_edge(&mut elements, Edge::Start);
    trim_edge(&mut elements, Edge::End);
    elements
}

// 返回 true 表示已经碰到会输出文字的元素
fn trim_edge(elements: &mut [DialogueElement], edge: Edge) -> bool {
    match edge {
        Edge::Start => elements.iter_mut().any(|e| trim_element(e, edge)),
        Edge::End => elements.iter_mut().rev().any(|e| trim_element(e, edge)),
    }
}

fn trim_element(element: &mut DialogueElement, edge: Edge) -> bool {
    match element {
        DialogueElement::PlainText { text } => {
            let trimmed = match edge {
                Edge::Start => text.trim_start_matches(is_edge_char).to_string(),
                Edge::End => text.trim_end_matches(is_edge_char).to_string(),
            };
            *text = trimmed;
            !text.is_empty()
        }
        DialogueElement::FormatTag(tag) => match tag.name.as_str() {
            "y" => false,
            // 注音在内容之后输出，末尾不能再往里修剪
            "ruby" | "h" if matches!(edge, Edge::End) && !tag.param.is_empty() => true,
            _ => trim_edge(&mut tag.content, edge),
        },
        DialogueElement::SpecialChar { name } => matches!(name.as_str(), "n" | "qt" | "os" | "es"),
        DialogueElement::InlineCommand { .. }
        | DialogueElement::Voice(_)
        | DialogueElement::ClickWait { .. }
        | DialogueElement::TimedWait { .. } => false,
    }
}

/// 纯文本渲染结果的收尾处理
///
/// 删除畸形输入残留的花括号，再去掉首尾空白、反引号和引号。
pub fn finish_plain_text(text: &str) -> String {
    let text = STRAY_BRACE_REGEX.replace_all(text, "");
    trim_edges(&text).to_string()
}

/// HTML渲染结果的收尾处理，额外去掉首尾各一个转义引号
pub fn finish_html(text: &str) -> String {
    let text = STRAY_BRACE_REGEX.replace_all(text, "");
    let mut text = trim_edges(&text);
    text = text.strip_prefix(ESCAPED_QUOTE).unwrap_or(text);
    text = text.strip_suffix(ESCAPED_QUOTE).unwrap_or(text);
    trim_edges(text).to_string()
}
