//! 来源配置注册表
//!
//! 来源 ID → 显示配置的不可变映射，外加一个默认配置。
//! 查找是全函数：任何来源（包括空字符串）都能得到一个配置。

use std::collections::HashMap;

use super::display_config::{DisplayConfig, MediaSize, TextSize};

/// 来源配置注册表（启动时构建，之后只读）
#[derive(Debug, Clone)]
pub struct ConfigRegistry {
    entries: HashMap<String, DisplayConfig>,
    default: DisplayConfig,
}

impl ConfigRegistry {
    /// 内置注册表：NFL、NASA 两个定制来源 + 默认配置
    pub fn baseline() -> Self {
        Self::builder()
            // 比分通知配球队 logo
            .source(
                "NFL",
                DisplayConfig::new(MediaSize::MEDIUM, TextSize::LARGE, TextSize::MEDIUM),
            )
            // 每日天文图：图片铺满，科普说明用小字
            .source(
                "NASA",
                DisplayConfig::new(MediaSize::FULL, TextSize::LARGE, TextSize::SMALL),
            )
            .default_config(DisplayConfig::standard())
            .build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// 查找来源配置，未注册的来源返回默认配置（区分大小写）
    pub fn resolve(&self, source_id: &str) -> DisplayConfig {
        self.entries
            .get(source_id)
            .copied()
            .unwrap_or(self.default)
    }

    /// 是否有定制配置
    pub fn contains(&self, source_id: &str) -> bool {
        self.entries.contains_key(source_id)
    }

    pub fn default_config(&self) -> DisplayConfig {
        self.default
    }

    /// 已注册来源（按名称排序）
    pub fn sources(&self) -> Vec<(&str, DisplayConfig)> {
        let mut sources: Vec<(&str, DisplayConfig)> = self
            .entries
            .iter()
            .map(|(id, config)| (id.as_str(), *config))
            .collect();
        sources.sort_by(|a, b| a.0.cmp(b.0));
        sources
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::baseline()
    }
}

/// 注册表构建器，测试和宿主程序可注入自定义配置
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: HashMap<String, DisplayConfig>,
    default: Option<DisplayConfig>,
}

impl RegistryBuilder {
    /// 添加来源配置（重复添加时后者覆盖前者）
    pub fn source(mut self, source_id: impl Into<String>, config: DisplayConfig) -> Self {
        self.entries.insert(source_id.into(), config);
        self
    }

    /// 设置默认配置
    pub fn default_config(mut self, config: DisplayConfig) -> Self {
        self.default = Some(config);
        self
    }

    pub fn build(self) -> ConfigRegistry {
        ConfigRegistry {
            entries: self.entries,
            default: self.default.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_named_sources() {
        let registry = ConfigRegistry::baseline();

        let nfl = registry.resolve("NFL");
        assert_eq!(nfl.media_size, MediaSize::MEDIUM);
        assert_eq!(nfl.headline_size, TextSize::LARGE);
        assert_eq!(nfl.info_size, TextSize::MEDIUM);

        let nasa = registry.resolve("NASA");
        assert_eq!(nasa.media_size, MediaSize::FULL);
        assert_eq!(nasa.headline_size, TextSize::LARGE);
        assert_eq!(nasa.info_size, TextSize::SMALL);
    }

    #[test]
    fn test_resolve_is_total() {
        let registry = ConfigRegistry::baseline();

        for source in ["", "WeatherAPI", "nfl", "NASA ", "本地"] {
            assert_eq!(registry.resolve(source), DisplayConfig::standard(), "{:?}", source);
        }
    }

    #[test]
    fn test_sources_sorted() {
        let registry = ConfigRegistry::baseline();
        let names: Vec<&str> = registry.sources().into_iter().map(|(id, _)| id).collect();
        assert_eq!(names, vec!["NASA", "NFL"]);
        assert!(registry.contains("NFL"));
        assert!(!registry.contains(""));
    }

    #[test]
    fn test_custom_registry() {
        let tiny = DisplayConfig::new(MediaSize::SMALL, TextSize::MEDIUM, TextSize::SMALL);
        let registry = ConfigRegistry::builder()
            .source("Sensor", tiny)
            .default_config(DisplayConfig::new(MediaSize::NONE, TextSize::SMALL, TextSize::SMALL))
            .build();

        assert_eq!(registry.resolve("Sensor"), tiny);
        assert_eq!(registry.resolve("NFL").media_size, MediaSize::NONE);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_builder_without_default_uses_standard() {
        let registry = ConfigRegistry::builder().build();
        assert!(registry.is_empty());
        assert_eq!(registry.resolve("anything"), DisplayConfig::standard());
    }
}
