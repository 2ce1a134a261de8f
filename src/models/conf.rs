use std::collections::HashMap;
use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::models::quote::SemanticClass;

/// 配置加载错误类型
#[derive(Error, Debug)]
pub enum ConfError {
    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("配置解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("无效的配置: {0}")]
    InvalidConfig(String),
}

pub type ConfResult<T> = Result<T, ConfError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    /// 固定语义预设，不会被脚本中的 preset_define 覆盖
    pub semantic_presets: HashMap<String, SemanticClass>,
    /// 默认动态颜色，每个脚本的 preset_define 在此基础上覆盖
    pub default_dynamic_colours: HashMap<String, String>,
    /// 格式标签嵌套解析的最大深度
    pub max_nesting_depth: usize,
    /// 批量解析前是否只保留相关行（对话、预设、分集标记、标签）
    pub prefilter_lines: bool,
    /// 并行渲染的工作线程数，0 表示按CPU数量
    pub render_workers: usize,
}

impl Default for Conf {
    fn default() -> Self {
        Conf {
            semantic_presets: default_semantic_presets(),
            default_dynamic_colours: default_dynamic_colours(),
            max_nesting_depth: 64,
            prefilter_lines: true,
            render_workers: 0,
        }
    }
}

/// 内置语义预设：1 为红字，2 为蓝字
pub fn default_semantic_presets() -> HashMap<String, SemanticClass> {
    let mut map = HashMap::new();
    map.insert("1".to_string(), SemanticClass::RedTruth);
    map.insert("2".to_string(), SemanticClass::BlueTruth);
    map
}

/// 内置动态颜色（金色、紫色文字）
pub fn default_dynamic_colours() -> HashMap<String, String> {
    let mut map = HashMap::new();
    map.insert("41".to_string(), "#FFAA00".to_string());
    map.insert("42".to_string(), "#AA71FF".to_string());
    map
}

impl Conf {
    pub fn from_json_str(text: &str) -> ConfResult<Conf> {
        let conf: Conf = serde_json::from_str(text)?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfResult<Conf> {
        let text = fs::read_to_string(path)?;
        Conf::from_json_str(&text)
    }

    fn validate(&self) -> ConfResult<()> {
        if self.max_nesting_depth == 0 {
            return Err(ConfError::InvalidConfig("max_nesting_depth 必须大于0".to_string()));
        }
        for (id, colour) in &self.default_dynamic_colours {
            if !colour.starts_with('#') {
                return Err(ConfError::InvalidConfig(format!("预设 {} 的颜色必须以#开头: {}", id, colour)));
            }
        }
        Ok(())
    }

    /// 实际使用的渲染线程数
    pub fn worker_count(&self) -> usize {
        if self.render_workers > 0 {
            return self.render_workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let conf = Conf::from_json_str(r#"{"max_nesting_depth": 8}"#).unwrap();
        assert_eq!(conf.max_nesting_depth, 8);
        assert_eq!(conf.semantic_presets.get("1"), Some(&SemanticClass::RedTruth));
        assert_eq!(conf.default_dynamic_colours.get("41").map(String::as_str), Some("#FFAA00"));
        assert!(conf.prefilter_lines);
    }

    #[test]
    fn semantic_presets_use_css_names() {
        let conf = Conf::from_json_str(r#"{"semantic_presets": {"7": "blue-truth"}}"#).unwrap();
        assert_eq!(conf.semantic_presets.len(), 1);
        assert_eq!(conf.semantic_presets.get("7"), Some(&SemanticClass::BlueTruth));
    }

    #[test]
    fn zero_depth_is_rejected() {
        let err = Conf::from_json_str(r#"{"max_nesting_depth": 0}"#).unwrap_err();
        assert!(matches!(err, ConfError::InvalidConfig(_)));
    }
}
