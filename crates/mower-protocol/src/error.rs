//! 协议层错误类型定义
//!
//! 所有解码失败都是**可恢复**的：上层把失败的属性按"未处理"路径
//! 转发到诊断通道，正常运行不受影响。

use thiserror::Error;

/// 协议解码错误
///
/// 对已识别 (siid, piid) 但形状/取值不符合预期的载荷返回此错误，
/// 绝不 panic。未知取值刻意返回错误以便众包逆向。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// 载荷长度不足以读取字段
    #[error("Payload too short: needed {needed} bytes, got {actual}")]
    PayloadTooShort { needed: usize, actual: usize },

    /// 载荷两端缺少帧定界字节（0xCE）
    #[error("Invalid sentinel bytes: start=0x{start:02X}, end=0x{end:02X}")]
    InvalidSentinel { start: u8, end: u8 },

    /// 去掉定界字节后的载荷长度未知（既非完整格式也非短格式）
    #[error("Unknown payload length: {len} bytes")]
    UnknownPayloadLength { len: usize },

    /// 值的 JSON 类型不符合预期
    #[error("Unexpected value type for {expected}: {actual}")]
    UnexpectedType {
        expected: &'static str,
        actual: String,
    },

    /// 必需字段缺失
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// 已识别属性携带了尚未理解的取值（众包策略：报告失败）
    #[error("Unknown value for {field}: {value}")]
    UnknownValue { field: &'static str, value: String },

    /// 取值超出合法范围
    #[error("Value out of range for {field}: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

#[cfg(test)]
mod tests {
    use super::DecodeError;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::InvalidSentinel { start: 0x00, end: 0xCE };
        assert_eq!(
            format!("{}", err),
            "Invalid sentinel bytes: start=0x00, end=0xCE"
        );

        let err = DecodeError::UnknownPayloadLength { len: 12 };
        assert!(format!("{}", err).contains("12 bytes"));

        let err = DecodeError::UnknownValue {
            field: "status_code",
            value: "99".to_string(),
        };
        assert!(format!("{}", err).contains("status_code"));
        assert!(format!("{}", err).contains("99"));
    }
}
