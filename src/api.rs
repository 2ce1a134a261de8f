//! 调用方API
//!
//! 把整份脚本（按行）转换为供搜索/索引层使用的扁平引言记录。

use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use crate::extractor::QuoteExtractor;
use crate::models::{character_name, Conf, ConfError, ExtractedQuote, ParsedQuote};
use crate::transformer::TransformerFactory;
use crate::utils::script_constants::RELEVANT_LINE_REGEX;

/// API错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("配置错误: {0}")]
    ConfError(#[from] ConfError),

    #[error("渲染任务失败: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// 只保留与引言相关的行：对话、preset_define、new_* 分集标记和标签
pub fn prefilter_lines<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines
        .iter()
        .copied()
        .filter(|line| RELEVANT_LINE_REGEX.is_match(line))
        .collect()
}

/// 用工厂中的渲染器把提取结果转换为扁平记录
pub fn render_quote(quote: &ExtractedQuote, factory: &TransformerFactory) -> ParsedQuote {
    ParsedQuote {
        text: factory.plain_text().transform(&quote.content),
        text_html: factory.html().transform(&quote.content),
        character_id: quote.character_id.clone(),
        character: character_name(&quote.character_id).to_string(),
        audio_id: quote.audio_id.clone(),
        episode: quote.episode,
        content_type: quote.content_type.clone(),
        has_red_truth: quote.truth.has_red,
        has_blue_truth: quote.truth.has_blue,
    }
}

/// 单线程的脚本引言解析器
pub struct QuoteParser {
    conf: Conf,
    extractor: QuoteExtractor,
}

impl Default for QuoteParser {
    fn default() -> Self {
        Self::new(Conf::default())
    }
}

impl QuoteParser {
    pub fn new(conf: Conf) -> Self {
        QuoteParser {
            extractor: QuoteExtractor::from_conf(&conf),
            conf,
        }
    }

    pub fn conf(&self) -> &Conf {
        &self.conf
    }

    /// 提取但不渲染
    pub fn extract_all(&mut self, lines: &[&str]) -> Vec<ExtractedQuote> {
        let input = if self.conf.prefilter_lines {
            prefilter_lines(lines).join("\n")
        } else {
            lines.join("\n")
        };
        self.extractor.extract_quotes(&input)
    }

    /// 解析所有行并渲染为扁平记录
    pub fn parse_all(&mut self, lines: &[&str]) -> Vec<ParsedQuote> {
        let extracted = self.extract_all(lines);
        let factory = TransformerFactory::new(self.extractor.presets());
        extracted.iter().map(|q| render_quote(q, &factory)).collect()
    }

    /// 最近一次解析使用的渲染器工厂
    pub fn factory(&self) -> TransformerFactory {
        TransformerFactory::new(self.extractor.presets())
    }
}

/// 解析所有行，渲染阶段分块并行执行
///
/// 提取按脚本顺序串行完成；渲染按连续分块交给阻塞线程池，每个任务持有自己的
/// 预设上下文副本和渲染器，结果顺序与脚本顺序一致。
pub async fn parse_all_parallel(lines: Vec<String>, conf: &Conf) -> ApiResult<Vec<ParsedQuote>> {
    let mut parser = QuoteParser::new(conf.clone());
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let extracted = parser.extract_all(&refs);
    let total = extracted.len();

    let workers = conf.worker_count().max(1);
    let chunk_size = ((total + workers - 1) / workers).max(1);
    info!(quotes = total, workers, chunk_size, "开始并行渲染引言");

    let mut handles = Vec::new();
    let mut remaining = extracted.into_iter();
    loop {
        let chunk: Vec<ExtractedQuote> = remaining.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        let presets = parser.extractor.presets().clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let factory = TransformerFactory::new(&presets);
            chunk.iter().map(|q| render_quote(q, &factory)).collect::<Vec<_>>()
        }));
    }

    let mut quotes = Vec::with_capacity(total);
    for handle in handles {
        quotes.extend(handle.await?);
    }
    Ok(quotes)
}

/// 解析脚本文本，返回JSON格式的引言列表
pub async fn parse_script_text(text: String, conf: Option<Conf>) -> ApiResult<String> {
    let conf = conf.unwrap_or_default();
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    let quotes = parse_all_parallel(lines, &conf).await?;
    Ok(serde_json::to_string(&quotes)?)
}

/// 读取并解析脚本文件
pub fn parse_script_file(path: impl AsRef<Path>, conf: &Conf) -> ApiResult<Vec<ParsedQuote>> {
    let text = fs::read_to_string(path)?;
    let lines: Vec<&str> = text.lines().collect();
    let mut parser = QuoteParser::new(conf.clone());
    Ok(parser.parse_all(&lines))
}
