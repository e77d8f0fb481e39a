//! 标量属性的枚举映射
//!
//! 设备状态码（2:1 / REST `latestStatus`）、充电状态（3:2）与
//! 固件安装状态（1:2）都是小整数枚举。充电与固件安装状态的未知
//! 取值按解码失败处理（众包策略）；设备状态码的未知取值保留原码，
//! 只在展示名上退化为 `unknown (N)`。

use num_enum::TryFromPrimitive;
use serde::Serialize;
use serde_json::{Value, json};

/// 状态码 1 = 割草中；该状态到达时重置任务完成标志
pub const STATUS_CODE_MOWING: i64 = 1;

/// 设备状态码的展示名
///
/// 表驱动而非枚举：状态码空间明显大于已逆向的部分，
/// 未知码照常存储、通知，只是展示名退化。
pub fn status_name(code: i64) -> String {
    match code {
        0 => "standby".to_string(),
        1 => "mowing".to_string(),
        2 => "paused".to_string(),
        3 => "error".to_string(),
        4 => "returning".to_string(),
        5 => "charging".to_string(),
        10 => "updating".to_string(),
        13 => "charging_complete".to_string(),
        other => format!("unknown ({other})"),
    }
}

/// 状态通知载荷：原始码 + 展示名
pub fn json_status_payload(code: i64) -> Value {
    json!({"code": code, "name": status_name(code)})
}

/// 充电状态（3:2）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive)]
#[repr(i64)]
#[serde(rename_all = "snake_case")]
pub enum ChargingStatus {
    NotCharging = 0,
    Charging = 1,
    Discharging = 2,
    ChargingComplete = 3,
}

impl ChargingStatus {
    /// 展示文本（通知载荷用）
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargingStatus::NotCharging => "not_charging",
            ChargingStatus::Charging => "charging",
            ChargingStatus::Discharging => "discharging",
            ChargingStatus::ChargingComplete => "charging_complete",
        }
    }
}

/// 固件安装状态（1:2）
///
/// 只观测到两个取值：2 = 有新固件可用，3 = 下载完成后安装中。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive)]
#[repr(i64)]
#[serde(rename_all = "snake_case")]
pub enum FirmwareInstallState {
    NewFirmwareAvailable = 2,
    Installing = 3,
}

impl FirmwareInstallState {
    pub fn description(&self) -> &'static str {
        match self {
            FirmwareInstallState::NewFirmwareAvailable => "New firmware available",
            FirmwareInstallState::Installing => "Installing firmware after download",
        }
    }
}

/// 2:65 任务导航状态中唯一被确认的取值
pub const TASK_NAV_DOCK: &str = "dm::TASK_NAV_DOCK";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_name_known_and_unknown() {
        assert_eq!(status_name(1), "mowing");
        assert_eq!(status_name(13), "charging_complete");
        assert_eq!(status_name(99), "unknown (99)");
    }

    #[test]
    fn test_status_payload_shape() {
        let payload = json_status_payload(1);
        assert_eq!(payload["code"], json!(1));
        assert_eq!(payload["name"], json!("mowing"));
    }

    #[test]
    fn test_charging_status_from_wire() {
        assert_eq!(ChargingStatus::try_from(1), Ok(ChargingStatus::Charging));
        assert_eq!(ChargingStatus::Charging.as_str(), "charging");
        // 未知取值由调用方转成解码失败
        assert!(ChargingStatus::try_from(42).is_err());
    }

    #[test]
    fn test_firmware_install_state_from_wire() {
        assert_eq!(
            FirmwareInstallState::try_from(2),
            Ok(FirmwareInstallState::NewFirmwareAvailable)
        );
        assert_eq!(FirmwareInstallState::try_from(3), Ok(FirmwareInstallState::Installing));
        assert!(FirmwareInstallState::try_from(99).is_err());
    }
}
