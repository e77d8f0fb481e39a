//! 设备聚合配置

use std::time::Duration;

/// 归航序列等待「任务完成」信号的默认时长
pub const DEFAULT_DOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// 设备聚合配置
///
/// 超时可配置；超时到期是软性的（记录告警后继续归航），
/// 不会中止序列。
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// STOP 之后等待任务完成信号的上限
    pub dock_wait_timeout: Duration,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self { dock_wait_timeout: DEFAULT_DOCK_WAIT_TIMEOUT }
    }
}

impl DeviceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dock_wait_timeout(mut self, timeout: Duration) -> Self {
        self.dock_wait_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dock_wait_timeout() {
        assert_eq!(DeviceConfig::default().dock_wait_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_override() {
        let config = DeviceConfig::new().with_dock_wait_timeout(Duration::from_millis(50));
        assert_eq!(config.dock_wait_timeout, Duration::from_millis(50));
    }
}
