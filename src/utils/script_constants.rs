use lazy_static::lazy_static;
use regex::Regex;

pub struct ScriptConstants;

impl ScriptConstants {
    // 无参数无内容时折叠为 SpecialChar 的标签名
    pub fn special_char_tags() -> &'static [&'static str] {
        &["n", "0", "qt", "ob", "eb", "os", "es", "-", "t", "parallel"]
    }

    pub fn is_special_char_tag(name: &str) -> bool {
        Self::special_char_tags().contains(&name)
    }

    // 需要单独解析的行首指令
    pub fn dialogue_commands() -> &'static [&'static str] {
        &["d", "d2"]
    }

    // 可以推断分集的语音ID首位数字范围
    pub fn inferable_episodes() -> std::ops::RangeInclusive<i32> {
        1..=8
    }
}

lazy_static! {
    // 番外标签，如 *o3_start
    pub static ref OMAKE_LABEL_REGEX: Regex = Regex::new(r"^o(\d+)_").unwrap();

    // {c:RRGGBB:...} 的颜色参数，不带 #
    pub static ref COLOUR_PARAM_REGEX: Regex = Regex::new(r"^[0-9A-Fa-f]{3,8}$").unwrap();

    // 渲染后残留的不成对花括号
    pub static ref STRAY_BRACE_REGEX: Regex = Regex::new(r"[{}]").unwrap();

    // 批量解析时保留的行：对话、预设定义、分集标记、标签
    pub static ref RELEVANT_LINE_REGEX: Regex =
        Regex::new(r"^(?:d2? |preset_define.|new_.|\*.)").unwrap();
}
