//! 客户端层错误类型定义

use thiserror::Error;

/// 传输层错误
///
/// 由 `CloudTransport` 实现方返回。核心层不重试，
/// 重试策略属于传输协作方。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// 云端未连接
    #[error("Cloud transport not connected")]
    NotConnected,

    /// 请求被拒绝或执行失败
    #[error("Transport request failed: {0}")]
    Failed(String),
}

/// 设备聚合层错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeviceError {
    /// 动作发送或 REST 请求失败
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Failed("mqtt publish rejected".to_string());
        assert!(format!("{}", err).contains("mqtt publish rejected"));
        assert_eq!(format!("{}", TransportError::NotConnected), "Cloud transport not connected");
    }

    #[test]
    fn test_from_transport_error() {
        let err: DeviceError = TransportError::NotConnected.into();
        assert!(matches!(err, DeviceError::Transport(TransportError::NotConnected)));
    }
}
