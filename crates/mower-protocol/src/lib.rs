//! # Mower Protocol
//!
//! 割草机云端属性协议定义（无传输依赖）
//!
//! 割草机通过云端中继暴露同一套属性标识（MQTT 推送 + REST 拉取），
//! 本 crate 负责把原始消息解码为语义化的值，不做任何 I/O。
//!
//! ## 模块
//!
//! - `ids`: 属性/事件/动作标识常量定义（siid/piid/eiid/aiid）
//! - `message`: 入站消息模型（properties_changed / event_occured / props）
//! - `pose_coverage`: 位姿与覆盖率二进制遥测解码（1:4）
//! - `device_code`: 设备代码解码与分级（2:2）
//! - `mower_control`: 割草控制状态解码（2:56）
//! - `scheduling`: 任务调度属性族解码（2:50 / 2:51 / 2:52）
//! - `service5`: Service 5 电源遥测解码（5:104 - 5:108）
//! - `telemetry`: 复合遥测属性解码（1:1，温度）
//! - `mappings`: 标量属性的枚举映射（状态码、充电状态、固件安装状态）
//!
//! ## 解码失败策略
//!
//! 对已识别但尚未理解的值，解码器返回 `DecodeError` 而不是 panic，
//! 由上层把原始消息转发到诊断通道，便于后续协议逆向（众包策略）。
//!
//! ## 字节序
//!
//! 二进制载荷（1:4）使用 Intel (LSB) 低位在前（小端字节序），
//! 本模块提供了显式的小端读取工具函数。

pub mod device_code;
pub mod error;
pub mod ids;
pub mod mappings;
pub mod message;
pub mod mower_control;
pub mod pose_coverage;
pub mod scheduling;
pub mod service5;
pub mod telemetry;

// 重新导出常用类型
pub use device_code::*;
pub use error::DecodeError;
pub use ids::*;
pub use mappings::*;
pub use message::*;
pub use mower_control::*;
pub use pose_coverage::*;
pub use scheduling::*;
pub use service5::*;
pub use telemetry::*;

/// 字节序读取工具函数
///
/// 1:4 载荷内的多字节整数使用小端字节序，
/// 这些函数在协议层做带边界检查的读取。
///
/// 小端字节序读取 i16
pub fn read_i16_le(payload: &[u8], offset: usize) -> Result<i16, DecodeError> {
    let bytes: [u8; 2] = payload
        .get(offset..offset + 2)
        .and_then(|s| s.try_into().ok())
        .ok_or(DecodeError::PayloadTooShort {
            needed: offset + 2,
            actual: payload.len(),
        })?;
    Ok(i16::from_le_bytes(bytes))
}

/// 小端字节序读取 u16
pub fn read_u16_le(payload: &[u8], offset: usize) -> Result<u16, DecodeError> {
    let bytes: [u8; 2] = payload
        .get(offset..offset + 2)
        .and_then(|s| s.try_into().ok())
        .ok_or(DecodeError::PayloadTooShort {
            needed: offset + 2,
            actual: payload.len(),
        })?;
    Ok(u16::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_i16_le() {
        let payload = [0x34, 0x12];
        assert_eq!(read_i16_le(&payload, 0).unwrap(), 0x1234);
    }

    #[test]
    fn test_read_i16_le_negative() {
        let payload = [0xFF, 0xFF];
        assert_eq!(read_i16_le(&payload, 0).unwrap(), -1);
    }

    #[test]
    fn test_read_u16_le() {
        // 10000 centi-sqm = 0x2710
        let payload = [0x10, 0x27];
        assert_eq!(read_u16_le(&payload, 0).unwrap(), 10000);
    }

    #[test]
    fn test_read_out_of_bounds() {
        let payload = [0x01, 0x02, 0x03];
        assert!(matches!(
            read_i16_le(&payload, 2),
            Err(DecodeError::PayloadTooShort { needed: 4, actual: 3 })
        ));
        assert!(read_u16_le(&payload, 0).is_ok());
    }
}
