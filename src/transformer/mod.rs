pub mod preset;
pub mod text_processor;
pub mod plaintext;
pub mod html;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use crate::models::DialogueElement;

pub use preset::PresetContext;
pub use plaintext::PlainTextTransformer;
pub use html::HtmlTransformer;
pub use text_processor::{finish_plain_text, finish_html, trim_edge_text};

/// 渲染器错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformerError {
    #[error("未知的输出格式: {0}")]
    UnknownFormat(String),
}

pub type TransformerResult<T> = Result<T, TransformerError>;

/// 把对话元素树渲染为字符串
pub trait Transformer: Send + Sync {
    fn transform(&self, elements: &[DialogueElement]) -> String;
}

/// 输出格式
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Format {
    PlainText,
    Html,
    /// 调用方注册的自定义格式
    Custom(String),
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::PlainText => f.write_str("plain"),
            Format::Html => f.write_str("html"),
            Format::Custom(name) => f.write_str(name),
        }
    }
}

impl FromStr for Format {
    type Err = TransformerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "plaintext" | "text" => Ok(Format::PlainText),
            "html" => Ok(Format::Html),
            _ => Err(TransformerError::UnknownFormat(s.to_string())),
        }
    }
}

/// 渲染器工厂，按格式缓存渲染器实例
pub struct TransformerFactory {
    presets: PresetContext,
    transformers: HashMap<Format, Box<dyn Transformer>>,
}

impl TransformerFactory {
    /// 使用给定的预设上下文创建工厂，并注册纯文本与HTML渲染器
    pub fn new(presets: &PresetContext) -> Self {
        let mut transformers: HashMap<Format, Box<dyn Transformer>> = HashMap::new();
        transformers.insert(Format::PlainText, Box::new(PlainTextTransformer::new()));
        transformers.insert(Format::Html, Box::new(HtmlTransformer::new(presets.clone())));

        TransformerFactory {
            presets: presets.clone(),
            transformers,
        }
    }

    pub fn get(&self, format: &Format) -> TransformerResult<&dyn Transformer> {
        self.transformers
            .get(format)
            .map(|t| t.as_ref())
            .ok_or_else(|| TransformerError::UnknownFormat(format.to_string()))
    }

    /// 注册（或替换）某个格式的渲染器
    pub fn register(&mut self, format: Format, transformer: Box<dyn Transformer>) {
        self.transformers.insert(format, transformer);
    }

    pub fn presets(&self) -> &PresetContext {
        &self.presets
    }

    pub fn plain_text(&self) -> &dyn Transformer {
        self.transformers[&Format::PlainText].as_ref()
    }

    pub fn html(&self) -> &dyn Transformer {
        self.transformers[&Format::Html].as_ref()
    }
}
