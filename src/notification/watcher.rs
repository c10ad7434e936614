//! 槽监视 - 渲染端视角读取当前通知
//!
//! 轮询槽文件，序号或发布时间变化时返回新记录。
//! 槽文件和锁文件都被清掉后序号会从 1 重新开始，只比较序号会漏掉这条。

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use super::payload::SlotRecord;
use super::sinks::read_slot;

/// 槽监视器
pub struct SlotWatcher {
    path: PathBuf,
    last_seen: Option<(u64, DateTime<Utc>)>,
}

impl SlotWatcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_seen: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 最近一次看到的序号
    pub fn last_sequence(&self) -> Option<u64> {
        self.last_seen.map(|(sequence, _)| sequence)
    }

    /// 读取一次，有新内容时返回记录
    pub fn poll(&mut self) -> Result<Option<SlotRecord>> {
        let record = match read_slot(&self.path)? {
            Some(record) => record,
            None => return Ok(None),
        };

        let seen = (record.sequence, record.published_at);
        if self.last_seen == Some(seen) {
            return Ok(None);
        }

        self.last_seen = Some(seen);
        Ok(Some(record))
    }
}
