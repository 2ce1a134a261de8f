use serde::Serialize;
use crate::models::token::{Position, Token};

/// 解析后的完整脚本，行顺序即脚本执行顺序
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Script {
    pub lines: Vec<Line>,
}

impl Script {
    pub fn new(lines: Vec<Line>) -> Self {
        Script { lines }
    }

    /// 遍历脚本中的所有对话行
    pub fn dialogue_lines(&self) -> impl Iterator<Item = &DialogueLine> {
        self.lines.iter().filter_map(|line| match line {
            Line::Dialogue(d) => Some(d),
            _ => None,
        })
    }

    /// 遍历脚本中的所有 preset_define 行
    pub fn preset_defines(&self) -> impl Iterator<Item = &PresetDefineLine> {
        self.lines.iter().filter_map(|line| match line {
            Line::PresetDefine(p) => Some(p),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Line {
    Comment(CommentLine),
    Label(LabelLine),
    Command(CommandLine),
    PresetDefine(PresetDefineLine),
    EpisodeMarker(EpisodeMarkerLine),
    Dialogue(DialogueLine),
}

impl Line {
    pub fn pos(&self) -> Position {
        match self {
            Line::Comment(l) => l.pos,
            Line::Label(l) => l.pos,
            Line::Command(l) => l.pos,
            Line::PresetDefine(l) => l.pos,
            Line::EpisodeMarker(l) => l.pos,
            Line::Dialogue(l) => l.pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentLine {
    pub text: String,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelLine {
    pub name: String,
    pub pos: Position,
}

/// 未被特别识别的引擎指令，参数按原token保存（逗号已跳过）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandLine {
    pub command: String,
    pub args: Vec<Token>,
    pub pos: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PresetDefineLine {
    pub id: i32,
    pub font_id: i32,
    pub size: i32,
    /// 形如 `#RRGGBB`，缺失时为空
    pub colour: String,
    pub flags: Vec<i32>,
    pub pos: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeKind {
    Episode,
    Tea,
    Ura,
}

impl EpisodeKind {
    /// 对应的内容类型，正篇为空字符串
    pub fn content_type(&self) -> &'static str {
        match self {
            EpisodeKind::Episode => "",
            EpisodeKind::Tea => "tea",
            EpisodeKind::Ura => "ura",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeMarkerLine {
    pub kind: EpisodeKind,
    pub number: i32,
    pub pos: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueCommand {
    D,
    D2,
}

impl DialogueCommand {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "d" => Some(DialogueCommand::D),
            "d2" => Some(DialogueCommand::D2),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DialogueCommand::D => "d",
            DialogueCommand::D2 => "d2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogueLine {
    pub command: DialogueCommand,
    pub content: Vec<DialogueElement>,
    pub pos: Position,
}

impl DialogueLine {
    /// 按文档顺序收集所有语音命令（包括嵌套在格式标签里的）
    pub fn voice_commands(&self) -> Vec<&VoiceCommand> {
        let mut voices = Vec::new();
        collect_voice_commands(&self.content, &mut voices);
        voices
    }
}

fn collect_voice_commands<'a>(elements: &'a [DialogueElement], voices: &mut Vec<&'a VoiceCommand>) {
    for element in elements {
        match element {
            DialogueElement::Voice(v) => voices.push(v),
            DialogueElement::FormatTag(tag) => collect_voice_commands(&tag.content, voices),
            _ => {}
        }
    }
}

/// 检查元素序列中（含嵌套标签）是否存在语音命令
pub fn contains_voice_command(elements: &[DialogueElement]) -> bool {
    elements.iter().any(|element| match element {
        DialogueElement::Voice(_) => true,
        DialogueElement::FormatTag(tag) => contains_voice_command(&tag.content),
        _ => false,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogueElement {
    PlainText { text: String },
    FormatTag(FormatTag),
    /// 换行、引号、括号转义以及若干无内容的占位标签
    SpecialChar { name: String },
    /// 未识别的方括号命令，原样保留但不渲染
    InlineCommand { command: String, args: String },
    Voice(VoiceCommand),
    ClickWait { kind: ClickWaitKind },
    TimedWait { skippable: bool, duration_ms: i64 },
}

impl DialogueElement {
    pub fn text(text: impl Into<String>) -> Self {
        DialogueElement::PlainText { text: text.into() }
    }

    pub fn special(name: impl Into<String>) -> Self {
        DialogueElement::SpecialChar { name: name.into() }
    }

    pub fn tag(name: &str, param: &str, content: Vec<DialogueElement>) -> Self {
        DialogueElement::FormatTag(FormatTag::new(name, param, content))
    }

    pub fn voice(channel: i32, character_id: &str, audio_id: &str) -> Self {
        DialogueElement::Voice(VoiceCommand {
            channel,
            character_id: character_id.to_string(),
            audio_id: audio_id.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatTag {
    pub name: String,
    pub param: String,
    pub content: Vec<DialogueElement>,
}

impl FormatTag {
    pub fn new(name: &str, param: &str, content: Vec<DialogueElement>) -> Self {
        FormatTag {
            name: name.to_string(),
            param: param.to_string(),
            content,
        }
    }

    /// 是否为 `p`/`preset` 预设标签
    pub fn is_preset(&self) -> bool {
        self.name == "p" || self.name == "preset"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoiceCommand {
    pub channel: i32,
    pub character_id: String,
    pub audio_id: String,
}

/// 点击等待的种类：`@` 行内等待，`\` 等待后清屏，`|` 竖线等待
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickWaitKind {
    Click,
    ClearPage,
    Pipe,
}

impl ClickWaitKind {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "@" => Some(ClickWaitKind::Click),
            "\\" => Some(ClickWaitKind::ClearPage),
            "|" => Some(ClickWaitKind::Pipe),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ClickWaitKind::Click => "@",
            ClickWaitKind::ClearPage => "\\",
            ClickWaitKind::Pipe => "|",
        }
    }
}
