use crate::models::{DialogueElement, SemanticClass, TruthFlags};
use crate::transformer::PresetContext;

/// 检查对话元素中出现了哪些真实类型
///
/// 只看 `p`/`preset` 标签的参数是否解析为语义预设；无论是否已命中都会继续
/// 深入嵌套内容，所以嵌套或先后出现的红蓝字都能同时检测到。
pub fn detect_truth(elements: &[DialogueElement], presets: &PresetContext) -> TruthFlags {
    let mut flags = TruthFlags::default();
    detect_in_elements(elements, presets, &mut flags);
    flags
}

fn detect_in_elements(elements: &[DialogueElement], presets: &PresetContext, flags: &mut TruthFlags) {
    for element in elements {
        let DialogueElement::FormatTag(tag) = element else { continue };

        if tag.is_preset() {
            match presets.semantic_class(&tag.param) {
                Some(SemanticClass::RedTruth) => flags.has_red = true,
                Some(SemanticClass::BlueTruth) => flags.has_blue = true,
                None => {}
            }
        }

        detect_in_elements(&tag.content, presets, flags);
    }
}
