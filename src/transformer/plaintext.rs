use crate::models::{DialogueElement, FormatTag};
use crate::transformer::text_processor::{finish_plain_text, trim_edge_text};
use crate::transformer::Transformer;

/// 纯文本渲染器，只保留文字内容
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextTransformer;

impl PlainTextTransformer {
    pub fn new() -> Self {
        PlainTextTransformer
    }

    fn collect(&self, buffer: &mut String, elements: &[DialogueElement]) {
        for element in elements {
            match element {
                DialogueElement::PlainText { text } => buffer.push_str(text),
                DialogueElement::FormatTag(tag) => self.write_format_tag(buffer, tag),
                DialogueElement::SpecialChar { name } => match name.as_str() {
                    "n" => buffer.push(' '),
                    "qt" => buffer.push('"'),
                    "os" => buffer.push('['),
                    "es" => buffer.push(']'),
                    _ => {}
                },
                // 等待、语音和未知命令不产生文字
                DialogueElement::InlineCommand { .. }
                | DialogueElement::Voice(_)
                | DialogueElement::ClickWait { .. }
                | DialogueElement::TimedWait { .. } => {}
            }
        }
    }

    fn write_format_tag(&self, buffer: &mut String, tag: &FormatTag) {
        match tag.name.as_str() {
            "y" => {}
            "ruby" | "h" => {
                self.collect(buffer, &tag.content);
                if !tag.param.is_empty() {
                    buffer.push_str(" (");
                    buffer.push_str(&tag.param);
                    buffer.push(')');
                }
            }
            _ => self.collect(buffer, &tag.content),
        }
    }
}

impl Transformer for PlainTextTransformer {
    fn transform(&self, elements: &[DialogueElement]) -> String {
        let elements = trim_edge_text(elements);
        let mut buffer = String::new();
        self.collect(&mut buffer, &elements);
        finish_plain_text(&buffer)
    }
}
