//! 文件单槽 Sink - 渲染端轮询的 JSON 文件
//!
//! 写入流程（带文件锁）：
//! 1. 对 `<slot>.lock` 加独占锁，多个进程同时发布时串行化
//! 2. 取锁文件里记录的序号与现有槽记录序号中较大者，加一得到下一个序号
//!    （槽文件被删或损坏时序号也不回退）
//! 3. 写入同目录下的临时文件并 fsync
//! 4. rename 覆盖目标文件（原子替换，渲染端不会读到半条记录）

use anyhow::{anyhow, Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::notification::payload::{ResolvedPayload, SlotRecord};
use crate::notification::sink::NotificationSink;

const SLOT_FILE_NAME: &str = "current_notification.json";

/// 文件单槽 Sink
#[derive(Debug, Clone)]
pub struct FileSlotSink {
    path: PathBuf,
}

impl FileSlotSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 默认槽位置：`~/.config/pod-notify/current_notification.json`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pod-notify")
            .join(SLOT_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取当前槽内容
    pub fn read_current(&self) -> Result<Option<SlotRecord>> {
        read_slot(&self.path)
    }

    fn sibling(&self, prefix: &str, suffix: &str) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| SLOT_FILE_NAME.to_string());
        self.path.with_file_name(format!("{}{}{}", prefix, name, suffix))
    }

    fn lock_path(&self) -> PathBuf {
        self.sibling("", ".lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".", ".tmp")
    }

    fn next_sequence(&self, issued: u64) -> Result<u64> {
        let current = match read_slot(&self.path) {
            Ok(Some(record)) => record.sequence,
            Ok(None) => 0,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Existing slot unreadable, continuing from issued sequence"
                );
                0
            }
        };

        issued
            .max(current)
            .checked_add(1)
            .ok_or_else(|| anyhow!("slot sequence exhausted for {}", self.path.display()))
    }

    fn write_atomic(&self, record: &SlotRecord) -> Result<()> {
        let temp_path = self.temp_path();

        let result = (|| -> Result<()> {
            let mut temp_file = File::create(&temp_path)
                .with_context(|| format!("create {}", temp_path.display()))?;
            serde_json::to_writer_pretty(&mut temp_file, record)?;
            writeln!(temp_file)?;
            temp_file.sync_all()?;
            fs::rename(&temp_path, &self.path)
                .with_context(|| format!("replace {}", self.path.display()))?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

impl Default for FileSlotSink {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl NotificationSink for FileSlotSink {
    fn name(&self) -> &str {
        "file_slot"
    }

    fn publish(&self, payload: &ResolvedPayload) -> Result<u64> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create slot directory {}", parent.display()))?;
            }
        }

        let lock_path = self.lock_path();
        let mut lock = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&lock_path)
            .with_context(|| format!("open {}", lock_path.display()))?;
        lock.lock_exclusive()
            .with_context(|| format!("lock {}", lock_path.display()))?;

        // 锁在 lock 关闭时释放
        let sequence = self.next_sequence(read_issued(&mut lock))?;
        let record = SlotRecord::new(sequence, payload.clone());
        self.write_atomic(&record)?;

        if let Err(e) = write_issued(&mut lock, sequence) {
            warn!(
                path = %lock_path.display(),
                error = %e,
                "Failed to record issued sequence"
            );
        }

        debug!(
            channel = "file_slot",
            path = %self.path.display(),
            sequence,
            "Slot replaced"
        );
        Ok(sequence)
    }
}

/// 锁文件内容为最近一次发出的序号，空或无法解析时为 0
fn read_issued(lock: &mut File) -> u64 {
    let mut content = String::new();
    if lock.seek(SeekFrom::Start(0)).is_err() || lock.read_to_string(&mut content).is_err() {
        return 0;
    }
    content.trim().parse().unwrap_or(0)
}

fn write_issued(lock: &mut File, sequence: u64) -> Result<()> {
    lock.set_len(0)?;
    lock.seek(SeekFrom::Start(0))?;
    write!(lock, "{}", sequence)?;
    lock.sync_all()?;
    Ok(())
}

/// 读取槽文件，文件不存在时返回 None
pub fn read_slot(path: &Path) -> Result<Option<SlotRecord>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };

    let record = serde_json::from_str(&content)
        .with_context(|| format!("parse slot record {}", path.display()))?;
    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::display_config::DisplayConfig;
    use crate::notification::envelope::NotificationData;
    use tempfile::tempdir;

    fn payload(headline: &str) -> ResolvedPayload {
        ResolvedPayload {
            notification: NotificationData {
                headline: headline.to_string(),
                ..Default::default()
            },
            config: DisplayConfig::standard(),
            from_source: String::new(),
        }
    }

    #[test]
    fn test_publish_creates_slot_and_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("slot.json");
        let sink = FileSlotSink::new(&path);

        let sequence = sink.publish(&payload("hello")).unwrap();
        assert_eq!(sequence, 1);

        let record = sink.read_current().unwrap().unwrap();
        assert_eq!(record.sequence, 1);
        assert_eq!(record.payload, payload("hello"));
        // 临时文件不残留
        assert!(!dir.path().join("nested").join(".slot.json.tmp").exists());
    }

    #[test]
    fn test_sequence_continues_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slot.json");

        assert_eq!(FileSlotSink::new(&path).publish(&payload("a")).unwrap(), 1);
        assert_eq!(FileSlotSink::new(&path).publish(&payload("b")).unwrap(), 2);

        let record = read_slot(&path).unwrap().unwrap();
        assert_eq!(record.sequence, 2);
        assert_eq!(record.payload.notification.headline, "b");
    }

    #[test]
    fn test_read_missing_slot() {
        let dir = tempdir().unwrap();
        assert!(read_slot(&dir.path().join("none.json")).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_slot_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slot.json");
        fs::write(&path, "{ half a rec").unwrap();

        assert!(read_slot(&path).is_err());
        let sequence = FileSlotSink::new(&path).publish(&payload("fresh")).unwrap();
        assert_eq!(sequence, 1);
        assert_eq!(
            read_slot(&path).unwrap().unwrap().payload.notification.headline,
            "fresh"
        );
    }

    #[test]
    fn test_publish_fails_when_parent_is_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let sink = FileSlotSink::new(blocker.join("slot.json"));
        assert!(sink.publish(&payload("x")).is_err());
    }

    #[test]
    fn test_exhausted_sequence_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slot.json");
        let last = SlotRecord::new(u64::MAX, payload("last"));
        fs::write(&path, serde_json::to_string(&last).unwrap()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let err = FileSlotSink::new(&path).publish(&payload("next")).unwrap_err();
        assert!(format!("{:#}", err).contains("exhausted"), "{:#}", err);
        // 槽内容不变
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_sequence_survives_slot_removal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slot.json");
        let sink = FileSlotSink::new(&path);

        assert_eq!(sink.publish(&payload("a")).unwrap(), 1);
        assert_eq!(sink.publish(&payload("b")).unwrap(), 2);

        // 渲染端清空槽后，序号仍然从锁文件继续
        fs::remove_file(&path).unwrap();
        assert_eq!(sink.publish(&payload("c")).unwrap(), 3);

        // 损坏的槽同样不会让序号回退
        fs::write(&path, "garbage").unwrap();
        assert_eq!(sink.publish(&payload("d")).unwrap(), 4);
        assert_eq!(fs::read_to_string(dir.path().join("slot.json.lock")).unwrap(), "4");
    }

    #[test]
    fn test_replace_failure_keeps_error_context() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slot.json");
        // 目标是目录时 rename 失败
        fs::create_dir(&path).unwrap();

        let err = FileSlotSink::new(&path).publish(&payload("x")).unwrap_err();
        assert!(format!("{:#}", err).contains("replace"), "{:#}", err);
        assert!(!dir.path().join(".slot.json.tmp").exists());

        // 失败后锁已释放，槽恢复可写后能继续发布
        fs::remove_dir(&path).unwrap();
        assert_eq!(FileSlotSink::new(&path).publish(&payload("y")).unwrap(), 1);
    }

    #[test]
    fn test_concurrent_publishers_never_tear_the_slot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slot.json");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sink = FileSlotSink::new(&path);
                std::thread::spawn(move || {
                    for j in 0..5 {
                        sink.publish(&payload(&format!("writer-{}-{}", i, j))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let record = read_slot(&path).unwrap().unwrap();
        assert_eq!(record.sequence, 40);
        assert!(record.payload.notification.headline.starts_with("writer-"));
    }
}
