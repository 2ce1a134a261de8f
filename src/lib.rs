pub mod models;
pub mod utils;
pub mod parser;
pub mod transformer;
pub mod extractor;
pub mod api;

pub use models::{
    Token,
    TokenKind,
    Position,
    Script,
    Line,
    DialogueLine,
    DialogueElement,
    FormatTag,
    VoiceCommand,
    ExtractedQuote,
    ParsedQuote,
    TruthFlags,
    SemanticClass,
    Conf
};

pub use parser::{
    tokenize,
    Lexer,
    ScriptParser
};

pub use transformer::{
    Format,
    HtmlTransformer,
    PlainTextTransformer,
    PresetContext,
    Transformer,
    TransformerError,
    TransformerFactory
};

pub use extractor::{
    QuoteExtractor,
    detect_truth
};

pub use api::{
    ApiError,
    ApiResult,
    QuoteParser,
    parse_all_parallel,
    parse_script_file,
    parse_script_text,
    prefilter_lines
};

/// 解析脚本文本
///
/// # Arguments
///
/// * `script` - 脚本文本
///
/// # Returns
///
/// 按行顺序排列的语法树
pub fn parse(script: &str) -> Script {
    parser::parse(script)
}

/// 解析脚本并提取引言，同时返回该脚本的预设上下文供渲染使用
pub fn extract_quotes(script: &str, config: &Conf) -> (Vec<ExtractedQuote>, PresetContext) {
    let mut extractor = QuoteExtractor::from_conf(config);
    let quotes = extractor.extract_quotes(script);
    (quotes, extractor.presets().clone())
}
