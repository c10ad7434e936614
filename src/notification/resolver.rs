//! 配置解析 - 为校验后的通知选择显示配置

use std::sync::Arc;

use super::display_config::DisplayConfig;
use super::envelope::ValidatedEnvelope;
use super::registry::ConfigRegistry;

/// 配置解析器，持有共享的只读注册表
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    registry: Arc<ConfigRegistry>,
}

impl ConfigResolver {
    pub fn new(registry: Arc<ConfigRegistry>) -> Self {
        Self { registry }
    }

    /// 按 fromSource 查找配置，没有失败路径
    pub fn resolve_config(&self, envelope: &ValidatedEnvelope) -> DisplayConfig {
        self.registry.resolve(&envelope.from_source)
    }

    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new(Arc::new(ConfigRegistry::baseline()))
    }
}
