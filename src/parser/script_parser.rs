use tracing::warn;
use crate::models::{
    ClickWaitKind,
    CommandLine,
    CommentLine,
    DialogueCommand,
    DialogueElement,
    DialogueLine,
    EpisodeKind,
    EpisodeMarkerLine,
    FormatTag,
    LabelLine,
    Line,
    PresetDefineLine,
    Script,
    Token,
    TokenKind,
    VoiceCommand
};
use crate::parser::lexer::{tokenize, Lexer};
use crate::utils::ScriptConstants;

/// 默认的格式标签最大嵌套深度
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// 递归下降语法分析器
///
/// 任何畸形输入都不会报错：缺失的数值字段取0，未知命令原样保留，
/// 一行出错不会影响整份脚本的解析。
pub struct ScriptParser {
    tokens: Vec<Token>,
    pos: usize,
    max_depth: usize,
}

/// 使用默认配置解析脚本文本
pub fn parse(text: &str) -> Script {
    ScriptParser::new().parse(text)
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptParser {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        ScriptParser {
            tokens: Vec::new(),
            pos: 0,
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// 解析整份脚本
    pub fn parse(&mut self, text: &str) -> Script {
        self.tokens = tokenize(text);
        self.pos = 0;

        let mut lines = Vec::new();
        while !self.is_at_end() {
            if let Some(line) = self.parse_line() {
                lines.push(line);
            }
        }

        self.tokens.clear();
        Script::new(lines)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).filter(|t| t.kind != TokenKind::Eof)
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek().cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof | TokenKind::Newline)
    }

    fn skip_newlines(&mut self) {
        while self.peek_kind() == TokenKind::Newline {
            self.advance();
        }
    }

    fn parse_line(&mut self) -> Option<Line> {
        self.skip_newlines();
        let token = self.advance()?;

        match token.kind {
            TokenKind::Comment => Some(Line::Comment(CommentLine {
                pos: token.pos(),
                text: token.value,
            })),
            TokenKind::Label => Some(Line::Label(LabelLine {
                pos: token.pos(),
                name: token.value,
            })),
            TokenKind::Command => Some(self.parse_command(token)),
            // 行首的其他token不构成指令，跳过
            _ => None,
        }
    }

    fn parse_command(&mut self, token: Token) -> Line {
        if let Some(command) = DialogueCommand::from_name(&token.value) {
            return Line::Dialogue(self.parse_dialogue(command, &token));
        }

        match token.value.as_str() {
            "preset_define" => Line::PresetDefine(self.parse_preset_define(&token)),
            "new_episode" => Line::EpisodeMarker(self.parse_episode_marker(&token, EpisodeKind::Episode)),
            "new_tea" => Line::EpisodeMarker(self.parse_episode_marker(&token, EpisodeKind::Tea)),
            "new_ura" => Line::EpisodeMarker(self.parse_episode_marker(&token, EpisodeKind::Ura)),
            _ => Line::Command(self.parse_generic_command(token)),
        }
    }

    fn parse_dialogue(&mut self, command: DialogueCommand, token: &Token) -> DialogueLine {
        let mut content = Vec::new();

        while !self.at_line_end() {
            let Some(next) = self.advance() else { break };
            match next.kind {
                TokenKind::Text => content.push(DialogueElement::PlainText { text: next.value }),
                TokenKind::FormatTag => content.push(self.parse_format_tag_element(&next.value, 0)),
                TokenKind::InlineCommand => content.push(parse_inline_command_element(&next.value)),
                // 反引号只是对话体的定界符
                _ => {}
            }
        }

        DialogueLine {
            command,
            content,
            pos: token.pos(),
        }
    }

    fn parse_format_tag_element(&self, raw: &str, depth: usize) -> DialogueElement {
        let (name, param, content) = split_format_tag(raw);

        if param.is_empty() && content.is_empty() && ScriptConstants::is_special_char_tag(name) {
            return DialogueElement::special(name);
        }

        let nested = if content.is_empty() {
            Vec::new()
        } else {
            self.parse_nested_content(content, depth + 1)
        };

        DialogueElement::FormatTag(FormatTag::new(name, param, nested))
    }

    // 标签内容包装成 d `...` 重新分析，使嵌套标签和语音命令也能结构化
    fn parse_nested_content(&self, content: &str, depth: usize) -> Vec<DialogueElement> {
        if depth > self.max_depth {
            warn!(depth, max_depth = self.max_depth, "格式标签嵌套过深，剩余内容按纯文本保留");
            return vec![DialogueElement::text(content)];
        }

        let wrapped = format!("d `{}`", content);
        let mut lexer = Lexer::new(&wrapped);
        let mut elements = Vec::new();

        loop {
            let token = lexer.next_token();
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Text => {
                    if !token.value.is_empty() {
                        elements.push(DialogueElement::PlainText { text: token.value });
                    }
                }
                TokenKind::FormatTag => elements.push(self.parse_format_tag_element(&token.value, depth)),
                TokenKind::InlineCommand => elements.push(parse_inline_command_element(&token.value)),
                _ => {}
            }
        }

        elements
    }

    fn parse_preset_define(&mut self, token: &Token) -> PresetDefineLine {
        let mut nums: Vec<i32> = Vec::new();
        let mut colour = String::new();

        while !self.at_line_end() {
            let Some(next) = self.advance() else { break };
            match next.kind {
                TokenKind::Number => nums.push(next.value.parse().unwrap_or(0)),
                TokenKind::String if next.value.starts_with('#') => {
                    // 只取第一个颜色，后面的是阴影等颜色
                    if colour.is_empty() {
                        colour = next.value;
                    }
                }
                _ => {}
            }
        }

        PresetDefineLine {
            id: nums.first().copied().unwrap_or(0),
            font_id: nums.get(1).copied().unwrap_or(0),
            size: nums.get(2).copied().unwrap_or(0),
            colour,
            flags: nums.get(3..).map(|f| f.to_vec()).unwrap_or_default(),
            pos: token.pos(),
        }
    }

    fn parse_episode_marker(&mut self, token: &Token, kind: EpisodeKind) -> EpisodeMarkerLine {
        let mut number = 0;
        if self.peek_kind() == TokenKind::Number {
            if let Some(next) = self.advance() {
                number = next.value.parse().unwrap_or(0);
            }
        }

        EpisodeMarkerLine {
            kind,
            number,
            pos: token.pos(),
        }
    }

    fn parse_generic_command(&mut self, token: Token) -> CommandLine {
        let mut args = Vec::new();
        while !self.at_line_end() {
            let Some(next) = self.advance() else { break };
            if next.kind != TokenKind::Comma {
                args.push(next);
            }
        }

        CommandLine {
            pos: token.pos(),
            command: token.value,
            args,
        }
    }
}

/// 拆分格式标签原始值为 (标签名, 参数, 内容)
///
/// `name:p1:p2` 中若 `p1` 含有 `{`，说明它其实是嵌套内容的一部分
/// （真正的参数不可能含有未闭合的花括号），此时 `p1:p2` 整体作为内容。
pub fn split_format_tag(raw: &str) -> (&str, &str, &str) {
    let Some((name, rest)) = raw.split_once(':') else {
        return (raw, "", "");
    };

    match rest.split_once(':') {
        None => (name, "", rest),
        Some((candidate, _)) if candidate.contains('{') => (name, "", rest),
        Some((param, content)) => (name, param, content),
    }
}

/// 拆分内联命令为 (命令, 参数)
pub fn split_inline_command(raw: &str) -> (&str, &str) {
    let value = raw.trim();

    if value.chars().count() == 1 {
        return (value, "");
    }

    if value.starts_with("!w") || value.starts_with("!d") {
        return (&value[..2], &value[2..]);
    }

    match value.find(char::is_whitespace) {
        Some(idx) => (&value[..idx], value[idx..].trim()),
        None => (value, ""),
    }
}

fn parse_inline_command_element(raw: &str) -> DialogueElement {
    let (command, args) = split_inline_command(raw);

    if let Some(kind) = ClickWaitKind::from_symbol(command) {
        return DialogueElement::ClickWait { kind };
    }

    match command {
        "!w" => DialogueElement::TimedWait {
            skippable: false,
            duration_ms: args.trim().parse().unwrap_or(0),
        },
        "!d" => DialogueElement::TimedWait {
            skippable: true,
            duration_ms: args.trim().parse().unwrap_or(0),
        },
        "lv" => DialogueElement::Voice(parse_voice_command(args)),
        _ => DialogueElement::InlineCommand {
            command: command.to_string(),
            args: args.to_string(),
        },
    }
}

/// 解析 `<channel>*"<characterId>"*"<audioId>"`，缺失字段取默认值
pub fn parse_voice_command(args: &str) -> VoiceCommand {
    let mut parts = args.split('*');
    let unquote = |s: &str| s.trim().trim_matches('"').to_string();

    VoiceCommand {
        channel: parts.next().and_then(|s| s.trim().parse().ok()).unwrap_or(0),
        character_id: parts.next().map(unquote).unwrap_or_default(),
        audio_id: parts.next().map(unquote).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_format_tag_cases() {
        assert_eq!(split_format_tag("n"), ("n", "", ""));
        assert_eq!(split_format_tag("i:text"), ("i", "", "text"));
        assert_eq!(split_format_tag("c:FF0000:red"), ("c", "FF0000", "red"));
        assert_eq!(split_format_tag("p:1:{c:FF0000:nested}"), ("p", "1", "{c:FF0000:nested}"));
        assert_eq!(split_format_tag("i:{c:FF0000:x}"), ("i", "", "{c:FF0000:x}"));
        assert_eq!(split_format_tag("a:b:c:d"), ("a", "b", "c:d"));
    }

    #[test]
    fn split_inline_command_cases() {
        assert_eq!(split_inline_command("@"), ("@", ""));
        assert_eq!(split_inline_command("!w500"), ("!w", "500"));
        assert_eq!(split_inline_command("!d 300"), ("!d", " 300"));
        assert_eq!(split_inline_command("lv 0*\"10\"*\"1\""), ("lv", "0*\"10\"*\"1\""));
        assert_eq!(split_inline_command("  quakey 5 "), ("quakey", "5"));
        assert_eq!(split_inline_command("se1"), ("se1", ""));
    }

    #[test]
    fn voice_command_tolerates_missing_fields() {
        assert_eq!(parse_voice_command("3"), VoiceCommand { channel: 3, ..Default::default() });
        let v = parse_voice_command("x*\"27\"");
        assert_eq!(v.channel, 0);
        assert_eq!(v.character_id, "27");
        assert_eq!(v.audio_id, "");
    }

    #[test]
    fn depth_cap_keeps_remaining_text() {
        let mut parser = ScriptParser::with_max_depth(1);
        let script = parser.parse("d `{i:{i:{i:deep}}}`");
        let Line::Dialogue(d) = &script.lines[0] else { panic!("expected dialogue") };
        let DialogueElement::FormatTag(outer) = &d.content[0] else { panic!("expected tag") };
        let DialogueElement::FormatTag(inner) = &outer.content[0] else { panic!("expected tag") };
        assert_eq!(inner.content, vec![DialogueElement::text("{i:deep}")]);
    }
}
