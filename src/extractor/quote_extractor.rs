use std::collections::{HashMap, HashSet};
use tracing::debug;
use crate::extractor::truth::detect_truth;
use crate::models::ast::contains_voice_command;
use crate::models::{Conf, DialogueElement, DialogueLine, ExtractedQuote, Line, Script};
use crate::parser::ScriptParser;
use crate::transformer::PresetContext;
use crate::utils::script_constants::OMAKE_LABEL_REGEX;
use crate::utils::{contains_letters, ScriptConstants, NARRATOR_ID};

/// 引言提取器
///
/// 按顺序扫描脚本行，维护当前分集与内容类型，为每个对话行生成一条引言。
/// 预设上下文在每次提取时按脚本重建，`presets()` 返回最近一次的结果，
/// 供渲染器使用。
pub struct QuoteExtractor {
    presets: PresetContext,
    max_depth: usize,
}

impl Default for QuoteExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteExtractor {
    pub fn new() -> Self {
        QuoteExtractor {
            presets: PresetContext::new(),
            max_depth: crate::parser::DEFAULT_MAX_DEPTH,
        }
    }

    pub fn from_conf(conf: &Conf) -> Self {
        QuoteExtractor {
            presets: PresetContext::from_conf(conf),
            max_depth: conf.max_nesting_depth,
        }
    }

    pub fn presets(&self) -> &PresetContext {
        &self.presets
    }

    /// 解析并提取
    pub fn extract_quotes(&mut self, text: &str) -> Vec<ExtractedQuote> {
        let script = ScriptParser::with_max_depth(self.max_depth).parse(text);
        self.extract_from_script(&script)
    }

    pub fn extract_from_script(&mut self, script: &Script) -> Vec<ExtractedQuote> {
        self.presets.collect_from_script(script);

        let mut quotes = Vec::new();
        let mut current_episode = 0;
        let mut current_content_type = String::new();

        for line in &script.lines {
            match line {
                Line::EpisodeMarker(marker) => {
                    current_episode = marker.number;
                    current_content_type = marker.kind.content_type().to_string();
                }
                Line::Label(label) => {
                    if let Some(caps) = OMAKE_LABEL_REGEX.captures(&label.name) {
                        if let Ok(episode) = caps[1].parse::<i32>() {
                            current_episode = episode;
                            current_content_type = "omake".to_string();
                        }
                    }
                }
                Line::Dialogue(dialogue) => {
                    let mut quote = self.extract_from_dialogue(dialogue);
                    if current_episode > 0 {
                        quote.episode = current_episode;
                    }
                    quote.content_type = current_content_type.clone();
                    quotes.push(quote);
                }
                Line::Comment(_) | Line::Command(_) | Line::PresetDefine(_) => {}
            }
        }

        debug!(
            lines = script.lines.len(),
            quotes = quotes.len(),
            narrator = quotes.iter().filter(|q| q.is_narrator()).count(),
            dynamic_presets = self.presets.dynamic_colours().len(),
            "脚本引言提取完成"
        );

        quotes
    }

    fn extract_from_dialogue(&self, dialogue: &DialogueLine) -> ExtractedQuote {
        let voices = dialogue.voice_commands();
        let truth = detect_truth(&dialogue.content, &self.presets);

        if voices.is_empty() || has_words_before_voice(&dialogue.content) {
            return ExtractedQuote {
                content: dialogue.content.clone(),
                character_id: NARRATOR_ID.to_string(),
                audio_id: String::new(),
                audio_character_map: None,
                audio_text_map: None,
                episode: 0,
                content_type: String::new(),
                truth,
            };
        }

        let character_id = voices[0].character_id.clone();

        // 语音ID去重，保持首次出现顺序
        let mut seen = HashSet::new();
        let mut audio_ids: Vec<&str> = Vec::new();
        for voice in &voices {
            if seen.insert(voice.audio_id.as_str()) {
                audio_ids.push(&voice.audio_id);
            }
        }

        let distinct_characters: HashSet<&str> = voices.iter().map(|v| v.character_id.as_str()).collect();
        let audio_character_map = if distinct_characters.len() > 1 {
            let mut map = HashMap::new();
            for voice in &voices {
                map.entry(voice.audio_id.clone())
                    .or_insert_with(|| voice.character_id.clone());
            }
            Some(map)
        } else {
            None
        };

        let audio_text_map = if audio_ids.len() > 1 {
            Some(build_audio_text_map(&dialogue.content))
        } else {
            None
        };

        ExtractedQuote {
            content: dialogue.content.clone(),
            character_id,
            audio_id: audio_ids.join(", "),
            audio_character_map,
            audio_text_map,
            episode: infer_episode(audio_ids[0]),
            content_type: String::new(),
            truth,
        }
    }
}

/// 按语音ID首位数字推断分集，不在 1..=8 范围内返回0
pub fn infer_episode(audio_id: &str) -> i32 {
    audio_id
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .map(|d| d as i32)
        .filter(|ep| ScriptConstants::inferable_episodes().contains(ep))
        .unwrap_or(0)
}

/// 第一个语音命令之前是否出现了含字母的文本
///
/// 旁白结尾偶尔会嵌入一段语音，这类行不能算作该语音的角色台词；
/// 只有省略号、标点的停顿（如 "......"）不算。
pub fn has_words_before_voice(elements: &[DialogueElement]) -> bool {
    words_before_voice(elements).unwrap_or(false)
}

// Some(结论) 表示已经遇到语音或文字，None 表示需要继续往后看
fn words_before_voice(elements: &[DialogueElement]) -> Option<bool> {
    for element in elements {
        match element {
            DialogueElement::Voice(_) => return Some(false),
            DialogueElement::PlainText { text } if contains_letters(text) => return Some(true),
            DialogueElement::FormatTag(tag) => {
                if let Some(found) = words_before_voice(&tag.content) {
                    return Some(found);
                }
            }
            _ => {}
        }
    }
    None
}

/// 为每个语音ID建立其后的文本片段
///
/// 片段是语音命令之后、下一个语音命令之前的所有元素；含有语音命令的格式标签
/// 会被展开遍历，这样片段边界在嵌套标签中也与语音命令一致。
pub fn build_audio_text_map(elements: &[DialogueElement]) -> HashMap<String, Vec<DialogueElement>> {
    let mut builder = AudioTextMapBuilder::default();
    builder.walk(elements);
    builder.finish()
}

#[derive(Default)]
struct AudioTextMapBuilder {
    result: HashMap<String, Vec<DialogueElement>>,
    current_audio_id: Option<String>,
    current_fragment: Vec<DialogueElement>,
}

impl AudioTextMapBuilder {
    fn walk(&mut self, elements: &[DialogueElement]) {
        for element in elements {
            match element {
                DialogueElement::Voice(voice) => {
                    self.flush();
                    self.current_audio_id = Some(voice.audio_id.clone());
                }
                DialogueElement::FormatTag(tag) if contains_voice_command(&tag.content) => {
                    self.walk(&tag.content);
                }
                _ => {
                    if self.current_audio_id.is_some() {
                        self.current_fragment.push(element.clone());
                    }
                }
            }
        }
    }

    fn flush(&mut self) {
        let fragment = std::mem::take(&mut self.current_fragment);
        if let Some(audio_id) = self.current_audio_id.take() {
            if !fragment.is_empty() {
                self.result.insert(audio_id, fragment);
            }
        }
    }

    fn finish(mut self) -> HashMap<String, Vec<DialogueElement>> {
        self.flush();
        self.result
    }
}
