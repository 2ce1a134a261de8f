use serde::{Deserialize, Serialize};
use std::fmt;

/// token类型，词法分析器产出的全部种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Eof,
    Newline,
    Comment,
    Label,
    Command,
    Number,
    String,
    Comma,
    Backtick,
    Text,
    BracketOpen,
    BracketClose,
    BraceOpen,
    BraceClose,
    Colon,
    Asterisk,
    Pipe,
    At,
    Backslash,
    Hash,
    Bang,
    InlineCommand,
    FormatTag,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Newline => "Newline",
            TokenKind::Comment => "Comment",
            TokenKind::Label => "Label",
            TokenKind::Command => "Command",
            TokenKind::Number => "Number",
            TokenKind::String => "String",
            TokenKind::Comma => "Comma",
            TokenKind::Backtick => "Backtick",
            TokenKind::Text => "Text",
            TokenKind::BracketOpen => "BracketOpen",
            TokenKind::BracketClose => "BracketClose",
            TokenKind::BraceOpen => "BraceOpen",
            TokenKind::BraceClose => "BraceClose",
            TokenKind::Colon => "Colon",
            TokenKind::Asterisk => "Asterisk",
            TokenKind::Pipe => "Pipe",
            TokenKind::At => "At",
            TokenKind::Backslash => "Backslash",
            TokenKind::Hash => "Hash",
            TokenKind::Bang => "Bang",
            TokenKind::InlineCommand => "InlineCommand",
            TokenKind::FormatTag => "FormatTag",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 源码中的位置（行号与列号均从1开始）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,   // token类型
    pub value: String,     // 原始文本（内联命令和格式标签不含外层括号）
    pub line: usize,       // 所在行号
    pub column: usize,     // 起始列号
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            value: value.into(),
            line,
            column,
        }
    }

    // 创建一个结束token
    pub fn eof(line: usize, column: usize) -> Self {
        Token::new(TokenKind::Eof, "", line, column)
    }

    pub fn position(&self) -> String {
        format!("{}:{}", self.line, self.column)
    }

    pub fn pos(&self) -> Position {
        Position {
            line: self.line,
            character: self.column,
        }
    }
}
