//! 传输层接缝
//!
//! MQTT/REST 传输（TLS、重连、鉴权、重试）是外部协作方，
//! 核心只依赖这个最小 trait：发动作、拉设备信息。
//! 入站消息由传输方反序列化后直接调用
//! [`MowerDevice::handle_message`](crate::device::MowerDevice::handle_message)。

use serde::Deserialize;

use crate::error::TransportError;
use mower_protocol::ActionId;

/// 云端传输协作方
///
/// 实现方负责连接管理与重试；核心对发送结果只做一次性判定。
pub trait CloudTransport: Send + Sync {
    /// 向设备发送一个动作（fire-and-confirm）
    fn execute_action(&self, action: &ActionId) -> Result<(), TransportError>;

    /// 从 REST `devices_list` 端点拉取设备信息
    fn fetch_device_info(&self) -> Result<DeviceInfo, TransportError>;
}

/// REST `devices_list` 返回的设备信息
///
/// 字段名沿用线上形状（`ver` / `latestStatus`），全部可选：
/// 不同固件版本返回的字段集合不一致。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceInfo {
    /// 固件版本
    #[serde(rename = "ver")]
    pub firmware_version: Option<String>,
    /// 电池百分比
    pub battery: Option<i64>,
    /// 最近一次状态码（与 2:1 同一取值空间）
    #[serde(rename = "latestStatus")]
    pub latest_status: Option<i64>,
    /// 机型字符串（设备代码表的选择依据）
    pub model: Option<String>,
    /// 序列号
    #[serde(rename = "sn")]
    pub serial_number: Option<String>,
    /// MAC 地址
    pub mac: Option<String>,
    /// 云端在线标志
    pub online: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_from_rest_shape() {
        let info: DeviceInfo = serde_json::from_value(serde_json::json!({
            "battery": 90,
            "latestStatus": 13,
            "ver": "1.5.0_test",
            "sn": "TEST123456",
            "mac": "AA:BB:CC:DD:EE:FF",
            "model": "mower.test.p2255",
            "online": true
        }))
        .unwrap();

        assert_eq!(info.firmware_version.as_deref(), Some("1.5.0_test"));
        assert_eq!(info.battery, Some(90));
        assert_eq!(info.latest_status, Some(13));
        assert_eq!(info.model.as_deref(), Some("mower.test.p2255"));
    }

    #[test]
    fn test_device_info_tolerates_missing_fields() {
        let info: DeviceInfo = serde_json::from_value(serde_json::json!({"battery": 50})).unwrap();
        assert_eq!(info.battery, Some(50));
        assert_eq!(info.firmware_version, None);
        assert_eq!(info.latest_status, None);
    }
}
