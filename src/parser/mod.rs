pub mod lexer;
pub mod script_parser;

pub use lexer::{tokenize, Lexer, Cursor};
pub use script_parser::{
    parse,
    ScriptParser,
    DEFAULT_MAX_DEPTH,
    split_format_tag,
    split_inline_command,
    parse_voice_command
};
