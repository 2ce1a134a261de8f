//! 脚本词法分析器
//!
//! 词法分析不是上下文无关的：遇到 `d`/`d2` 命令或反引号后切换到对话模式，
//! 在对话模式下自由文本、`[...]` 内联命令与 `{...}` 格式标签按对话规则扫描；
//! 反引号后紧跟换行或结尾时回到行模式。
//! 内联命令与格式标签只截取平衡括号之间的原始字符串，留给语法分析器处理。

use crate::models::{Token, TokenKind};
use crate::utils::ScriptConstants;

/// 词法分析游标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub pos: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor { pos: 0, line: 1, column: 1 }
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    cursor: Cursor,
    in_dialogue: bool,
}

/// 对整段文本做词法分析，结果以 Eof token 结尾
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).tokenize()
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            cursor: Cursor::default(),
            in_dialogue: false,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn in_dialogue(&self) -> bool {
        self.in_dialogue
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    pub fn next_token(&mut self) -> Token {
        if self.in_dialogue {
            self.next_dialogue_token()
        } else {
            self.next_line_token()
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.cursor.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.cursor.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor.pos += c.len_utf8();
        if c == '\n' {
            self.cursor.line += 1;
            self.cursor.column = 1;
        } else {
            self.cursor.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.advance();
        }
    }

    fn token_at(&self, kind: TokenKind, value: &str, start: Cursor) -> Token {
        Token::new(kind, value, start.line, start.column)
    }

    // 消费直到条件不满足，返回这段文本
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.cursor.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance();
        }
        &self.input[start..self.cursor.pos]
    }

    fn next_line_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            let start = self.cursor;
            let c = match self.peek() {
                Some(c) => c,
                None => return Token::eof(start.line, start.column),
            };

            match c {
                '\n' => {
                    self.advance();
                    return self.token_at(TokenKind::Newline, "\n", start);
                }
                '\r' => {
                    // CRLF 折叠为一个换行
                    self.advance();
                    if self.peek() == Some('\n') {
                        self.advance();
                    }
                    return self.token_at(TokenKind::Newline, "\n", start);
                }
                ';' => return self.scan_comment(),
                '*' => return self.scan_label(),
                ',' => {
                    self.advance();
                    return self.token_at(TokenKind::Comma, ",", start);
                }
                '-' | '0'..='9' => return self.scan_number(),
                '"' => return self.scan_quoted_string(),
                '`' => {
                    self.in_dialogue = true;
                    self.advance();
                    return self.token_at(TokenKind::Backtick, "`", start);
                }
                '[' => return self.scan_delimited('[', ']', TokenKind::InlineCommand),
                '#' => return self.scan_hash_colour(),
                c if is_ident_start(c) => {
                    let token = self.scan_identifier();
                    if ScriptConstants::dialogue_commands().contains(&token.value.as_str()) {
                        self.in_dialogue = true;
                    }
                    return token;
                }
                _ => {
                    // 无法识别的字符直接跳过
                    self.advance();
                }
            }
        }
    }

    fn next_dialogue_token(&mut self) -> Token {
        // 紧挨反引号、方括号、换行或结尾的空白不算文本
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            match self.peek_second() {
                None | Some('`') | Some('[') | Some('\n') | Some('\r') => {
                    self.advance();
                }
                Some(' ') | Some('\t') => {
                    // 连续空白：只有整段空白都落在分隔符前才跳过
                    if self.whitespace_run_precedes_delimiter() {
                        self.advance();
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }

        let start = self.cursor;
        let c = match self.peek() {
            Some(c) => c,
            None => {
                self.in_dialogue = false;
                return Token::eof(start.line, start.column);
            }
        };

        match c {
            '`' => {
                self.advance();
                if matches!(self.peek(), None | Some('\n') | Some('\r')) {
                    self.in_dialogue = false;
                }
                self.token_at(TokenKind::Backtick, "`", start)
            }
            '\n' | '\r' => {
                self.in_dialogue = false;
                self.next_line_token()
            }
            '[' => self.scan_delimited('[', ']', TokenKind::InlineCommand),
            '{' => self.scan_delimited('{', '}', TokenKind::FormatTag),
            _ => self.scan_dialogue_text(),
        }
    }

    fn whitespace_run_precedes_delimiter(&self) -> bool {
        let rest = self.input[self.cursor.pos..].trim_start_matches([' ', '\t']);
        matches!(rest.chars().next(), None | Some('`') | Some('[') | Some('\n') | Some('\r'))
    }

    fn scan_comment(&mut self) -> Token {
        let start = self.cursor;
        self.advance();
        let text = self.take_while(|c| c != '\n' && c != '\r');
        self.token_at(TokenKind::Comment, text, start)
    }

    fn scan_label(&mut self) -> Token {
        let start = self.cursor;
        self.advance();
        let name = self.take_while(is_ident_char);
        self.token_at(TokenKind::Label, name, start)
    }

    fn scan_number(&mut self) -> Token {
        let start = self.cursor;
        let begin = self.cursor.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        self.take_while(|c| c.is_ascii_digit());
        let value = &self.input[begin..self.cursor.pos];
        self.token_at(TokenKind::Number, value, start)
    }

    fn scan_quoted_string(&mut self) -> Token {
        let start = self.cursor;
        self.advance();
        let value = self.take_while(|c| c != '"' && c != '\n');
        if self.peek() == Some('"') {
            self.advance();
        }
        self.token_at(TokenKind::String, value, start)
    }

    fn scan_hash_colour(&mut self) -> Token {
        let start = self.cursor;
        let begin = self.cursor.pos;
        self.advance();
        self.take_while(|c| c.is_ascii_hexdigit());
        let value = &self.input[begin..self.cursor.pos];
        self.token_at(TokenKind::String, value, start)
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.cursor;
        let name = self.take_while(is_ident_char);
        self.token_at(TokenKind::Command, name, start)
    }

    // 截取平衡括号之间的原始内容；未闭合时截到行尾或输入结尾
    fn scan_delimited(&mut self, open: char, close: char, kind: TokenKind) -> Token {
        let start = self.cursor;
        self.advance();
        let begin = self.cursor.pos;
        let mut end = None;
        let mut depth = 1usize;

        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            let before = self.cursor.pos;
            self.advance();
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    end = Some(before);
                    break;
                }
            }
        }

        let value = &self.input[begin..end.unwrap_or(self.cursor.pos)];
        self.token_at(kind, value, start)
    }

    fn scan_dialogue_text(&mut self) -> Token {
        let start = self.cursor;
        let text = self.take_while(|c| !matches!(c, '\n' | '\r' | '`' | '[' | '{'));
        self.token_at(TokenKind::Text, text, start)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_input_yields_only_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn cursor_tracks_lines() {
        let mut lexer = Lexer::new("a\nb");
        lexer.next_token();
        lexer.next_token();
        let b = lexer.next_token();
        assert_eq!((b.line, b.column), (2, 1));
        assert_eq!(lexer.cursor().line, 2);
    }
}
