//! 显示配置 - 媒体尺寸与文字字号预设
//!
//! 渲染端按这些参数排版通知：
//! - mediaSize: 媒体最大尺寸（宽, 高），单位为显示像素
//! - headlineSize: 标题字号（pt）
//! - infoSize: 正文字号（pt）

use serde::{Deserialize, Serialize};

/// 媒体最大尺寸（宽, 高），序列化为 `[w, h]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediaSize(pub f64, pub f64);

impl MediaSize {
    pub const NONE: MediaSize = MediaSize(0.0, 0.0);
    pub const SMALL: MediaSize = MediaSize(64.0, 48.0);
    pub const MEDIUM: MediaSize = MediaSize(128.0, 96.0);
    pub const LARGE: MediaSize = MediaSize(256.0, 192.0);
    pub const FULL: MediaSize = MediaSize(640.0, 480.0);

    pub fn width(&self) -> f64 {
        self.0
    }

    pub fn height(&self) -> f64 {
        self.1
    }

    /// 预设名称（非预设尺寸返回 None）
    pub fn preset_name(&self) -> Option<&'static str> {
        const PRESETS: [(MediaSize, &str); 5] = [
            (MediaSize::NONE, "none"),
            (MediaSize::SMALL, "small"),
            (MediaSize::MEDIUM, "medium"),
            (MediaSize::LARGE, "large"),
            (MediaSize::FULL, "full"),
        ];

        PRESETS
            .iter()
            .find(|(size, _)| size == self)
            .map(|(_, name)| *name)
    }
}

impl std::fmt::Display for MediaSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.preset_name() {
            Some(name) => write!(f, "{} ({}x{})", name, self.0, self.1),
            None => write!(f, "{}x{}", self.0, self.1),
        }
    }
}

/// 文字字号预设（pt）
pub struct TextSize;

impl TextSize {
    pub const SMALL: f64 = 12.0;
    pub const MEDIUM: f64 = 24.0;
    pub const LARGE: f64 = 36.0;

    pub fn preset_name(size: f64) -> Option<&'static str> {
        if size == Self::SMALL {
            Some("small")
        } else if size == Self::MEDIUM {
            Some("medium")
        } else if size == Self::LARGE {
            Some("large")
        } else {
            None
        }
    }
}

/// 单个来源的显示配置（启动时确定，运行期不可变）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    pub media_size: MediaSize,
    pub headline_size: f64,
    pub info_size: f64,
}

impl DisplayConfig {
    pub const fn new(media_size: MediaSize, headline_size: f64, info_size: f64) -> Self {
        Self {
            media_size,
            headline_size,
            info_size,
        }
    }

    /// 默认配置：中等媒体、大标题、中等正文
    pub const fn standard() -> Self {
        Self::new(MediaSize::MEDIUM, TextSize::LARGE, TextSize::MEDIUM)
    }

    /// 简短描述，用于日志和 CLI 输出
    pub fn describe(&self) -> String {
        let text = |size: f64| match TextSize::preset_name(size) {
            Some(name) => format!("{} ({}pt)", name, size),
            None => format!("{}pt", size),
        };
        format!(
            "media={} headline={} info={}",
            self.media_size,
            text(self.headline_size),
            text(self.info_size)
        )
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_config_wire_format() {
        let config = DisplayConfig::new(MediaSize::FULL, TextSize::LARGE, TextSize::SMALL);
        let json = serde_json::to_value(config).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "mediaSize": [640.0, 480.0],
                "headlineSize": 36.0,
                "infoSize": 12.0
            })
        );
    }

    #[test]
    fn test_media_size_preset_name() {
        assert_eq!(MediaSize::MEDIUM.preset_name(), Some("medium"));
        assert_eq!(MediaSize::NONE.preset_name(), Some("none"));
        assert_eq!(MediaSize(100.0, 100.0).preset_name(), None);
    }

    #[test]
    fn test_describe() {
        let desc = DisplayConfig::standard().describe();
        assert_eq!(
            desc,
            "media=medium (128x96) headline=large (36pt) info=medium (24pt)"
        );
    }
}
