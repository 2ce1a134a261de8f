use crate::models::{DialogueElement, FormatTag};
use crate::transformer::preset::PresetContext;
use crate::transformer::text_processor::{finish_html, trim_edge_text};
use crate::transformer::Transformer;
use crate::utils::escape_html;
use crate::utils::script_constants::COLOUR_PARAM_REGEX;

/// HTML渲染器
///
/// 红/蓝字输出语义类名，其他预设输出内联颜色，文字内容做实体转义。
#[derive(Debug, Clone)]
pub struct HtmlTransformer {
    presets: PresetContext,
}

impl HtmlTransformer {
    pub fn new(presets: PresetContext) -> Self {
        HtmlTransformer { presets }
    }

    pub fn presets(&self) -> &PresetContext {
        &self.presets
    }

    fn collect(&self, buffer: &mut String, elements: &[DialogueElement]) {
        for element in elements {
            match element {
                DialogueElement::PlainText { text } => buffer.push_str(&escape_html(text)),
                DialogueElement::FormatTag(tag) => self.write_format_tag(buffer, tag),
                DialogueElement::SpecialChar { name } => match name.as_str() {
                    "n" => buffer.push_str("<br>"),
                    "qt" => buffer.push('"'),
                    "os" => buffer.push('['),
                    "es" => buffer.push(']'),
                    _ => {}
                },
                DialogueElement::InlineCommand { .. }
                | DialogueElement::Voice(_)
                | DialogueElement::ClickWait { .. }
                | DialogueElement::TimedWait { .. } => {}
            }
        }
    }

    fn write_span(&self, buffer: &mut String, open: &str, content: &[DialogueElement]) {
        buffer.push_str(open);
        self.collect(buffer, content);
        buffer.push_str("</span>");
    }

    fn write_format_tag(&self, buffer: &mut String, tag: &FormatTag) {
        match tag.name.as_str() {
            "y" => {}
            "i" | "italic" => {
                buffer.push_str("<em>");
                self.collect(buffer, &tag.content);
                buffer.push_str("</em>");
            }
            "c" | "color" | "colour" => {
                if COLOUR_PARAM_REGEX.is_match(&tag.param) {
                    let open = format!("<span style=\"color:#{}\">", tag.param);
                    self.write_span(buffer, &open, &tag.content);
                } else {
                    // 不是十六进制颜色的参数不写进属性
                    self.collect(buffer, &tag.content);
                }
            }
            "ruby" | "h" => {
                buffer.push_str("<ruby>");
                self.collect(buffer, &tag.content);
                buffer.push_str("<rp>(</rp><rt>");
                buffer.push_str(&escape_html(&tag.param));
                buffer.push_str("</rt><rp>)</rp></ruby>");
            }
            "p" | "preset" => {
                if let Some(class) = self.presets.semantic_class(&tag.param) {
                    let open = format!("<span class=\"{}\">", class.css_class());
                    self.write_span(buffer, &open, &tag.content);
                } else if let Some(colour) = self.presets.dynamic_colour(&tag.param) {
                    let open = format!("<span style=\"color:{}\">", escape_html(colour));
                    self.write_span(buffer, &open, &tag.content);
                } else {
                    // 无法解析的预设按无样式内容输出
                    self.collect(buffer, &tag.content);
                }
            }
            _ => self.collect(buffer, &tag.content),
        }
    }
}

impl Transformer for HtmlTransformer {
    fn transform(&self, elements: &[DialogueElement]) -> String {
        let elements = trim_edge_text(elements);
        let mut buffer = String::new();
        self.collect(&mut buffer, &elements);
        finish_html(&buffer)
    }
}
