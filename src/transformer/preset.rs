use std::collections::HashMap;
use std::sync::Arc;
use crate::models::{Conf, Script, SemanticClass};
use crate::models::conf::{default_dynamic_colours, default_semantic_presets};

/// 预设上下文
///
/// 语义预设（红/蓝字）固定不变，放在 `Arc` 里共享；动态颜色每个脚本重建一次。
/// 每个脚本或工作线程持有自己的副本，克隆开销很小。
#[derive(Debug, Clone, PartialEq)]
pub struct PresetContext {
    semantic_presets: Arc<HashMap<String, SemanticClass>>,
    default_colours: Arc<HashMap<String, String>>,
    dynamic_colours: HashMap<String, String>,
}

impl Default for PresetContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetContext {
    pub fn new() -> Self {
        Self::with_tables(default_semantic_presets(), default_dynamic_colours())
    }

    pub fn from_conf(conf: &Conf) -> Self {
        Self::with_tables(conf.semantic_presets.clone(), conf.default_dynamic_colours.clone())
    }

    fn with_tables(semantic: HashMap<String, SemanticClass>, defaults: HashMap<String, String>) -> Self {
        let defaults: HashMap<String, String> = defaults
            .into_iter()
            .map(|(id, colour)| (id, colour.to_uppercase()))
            .collect();
        PresetContext {
            semantic_presets: Arc::new(semantic),
            dynamic_colours: defaults.clone(),
            default_colours: Arc::new(defaults),
        }
    }

    /// 从脚本的 preset_define 行重建动态颜色
    ///
    /// 每次调用都会先恢复默认值，预设只在单个脚本内有效。
    /// 语义预设ID、空颜色和纯白（表示不覆盖）都会被跳过。
    pub fn collect_from_script(&mut self, script: &Script) {
        self.dynamic_colours = (*self.default_colours).clone();

        for preset in script.preset_defines() {
            let id = preset.id.to_string();
            if self.semantic_presets.contains_key(&id) {
                continue;
            }

            let colour = preset.colour.to_uppercase();
            if colour.is_empty() || colour == "#FFFFFF" {
                continue;
            }

            self.dynamic_colours.insert(id, colour);
        }
    }

    pub fn semantic_class(&self, preset_id: &str) -> Option<SemanticClass> {
        self.semantic_presets.get(preset_id).copied()
    }

    pub fn dynamic_colour(&self, preset_id: &str) -> Option<&str> {
        self.dynamic_colours.get(preset_id).map(String::as_str)
    }

    pub fn semantic_presets(&self) -> &HashMap<String, SemanticClass> {
        &self.semantic_presets
    }

    pub fn dynamic_colours(&self) -> &HashMap<String, String> {
        &self.dynamic_colours
    }
}
