use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::models::ast::DialogueElement;

/// 固定的语义预设样式（红字真实 / 蓝字真实）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticClass {
    #[serde(rename = "red-truth")]
    RedTruth,
    #[serde(rename = "blue-truth")]
    BlueTruth,
}

impl SemanticClass {
    /// 对应的CSS类名
    pub fn css_class(&self) -> &'static str {
        match self {
            SemanticClass::RedTruth => "red-truth",
            SemanticClass::BlueTruth => "blue-truth",
        }
    }
}

impl fmt::Display for SemanticClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// 引言中出现的真实类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruthFlags {
    pub has_red: bool,
    pub has_blue: bool,
}

impl TruthFlags {
    pub fn any(&self) -> bool {
        self.has_red || self.has_blue
    }
}

/// 从一行对话中提取出的引言
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedQuote {
    pub content: Vec<DialogueElement>,
    pub character_id: String,
    /// 去重后按首次出现顺序用 ", " 连接的语音ID
    pub audio_id: String,
    /// audioID → characterID，仅在多角色引言中存在
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_character_map: Option<HashMap<String, String>>,
    /// audioID → 该语音之后的文本片段，仅在多段语音引言中存在
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_text_map: Option<HashMap<String, Vec<DialogueElement>>>,
    /// 0 表示未知
    pub episode: i32,
    pub content_type: String,
    pub truth: TruthFlags,
}

impl ExtractedQuote {
    pub fn is_narrator(&self) -> bool {
        self.character_id == crate::utils::NARRATOR_ID
    }

    /// 拆分后的语音ID列表
    pub fn audio_ids(&self) -> Vec<&str> {
        if self.audio_id.is_empty() {
            return Vec::new();
        }
        self.audio_id.split(", ").collect()
    }
}

/// 渲染完成、供搜索/索引层使用的扁平引言记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuote {
    pub text: String,
    pub text_html: String,
    pub character_id: String,
    pub character: String,
    pub audio_id: String,
    pub episode: i32,
    pub content_type: String,
    pub has_red_truth: bool,
    pub has_blue_truth: bool,
}
