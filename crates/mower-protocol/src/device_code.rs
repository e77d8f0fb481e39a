//! 设备代码解码与分级（2:2）
//!
//! 设备代码是一个整数，含义随机型变化，需要先用连接时取得的
//! 机型字符串初始化代码表。每个代码固定归为错误/警告/信息三级之一，
//! 三级互斥，变更通知只进入其中一条通道（优先级 error > warning > info）。
//!
//! 代码表来自社区逆向，未收录的代码归为通用信息级条目。

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::pose_coverage::json_type_name;

/// 设备代码通知名（错误通道）
pub const DEVICE_CODE_ERROR_PROPERTY_NAME: &str = "device_code_error";
/// 设备代码通知名（警告通道）
pub const DEVICE_CODE_WARNING_PROPERTY_NAME: &str = "device_code_warning";
/// 设备代码通知名（信息通道）
pub const DEVICE_CODE_INFO_PROPERTY_NAME: &str = "device_code_info";

/// 代码级别（互斥，按代码固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeSeverity {
    Error,
    Warning,
    Info,
}

/// 解析后的代码条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceCodeData {
    pub code: i64,
    pub name: String,
    pub description: String,
    pub severity: CodeSeverity,
}

/// 通用代码表条目
struct CodeEntry {
    code: i64,
    name: &'static str,
    description: &'static str,
    severity: CodeSeverity,
}

/// 通用代码表（适用于目前已知的所有机型）
const GENERIC_CODE_TABLE: &[CodeEntry] = &[
    CodeEntry { code: 0, name: "ok", description: "No active code", severity: CodeSeverity::Info },
    CodeEntry {
        code: 1,
        name: "blade_blocked",
        description: "Blade disc blocked",
        severity: CodeSeverity::Error,
    },
    CodeEntry {
        code: 2,
        name: "lifted",
        description: "Mower lifted off the ground",
        severity: CodeSeverity::Error,
    },
    CodeEntry {
        code: 3,
        name: "tilted",
        description: "Mower tilted beyond safe angle",
        severity: CodeSeverity::Error,
    },
    CodeEntry {
        code: 4,
        name: "outside_boundary",
        description: "Mower outside the working boundary",
        severity: CodeSeverity::Error,
    },
    CodeEntry {
        code: 10,
        name: "battery_low",
        description: "Battery level low, returning to dock",
        severity: CodeSeverity::Warning,
    },
    CodeEntry {
        code: 11,
        name: "rain_detected",
        description: "Rain detected, mowing postponed",
        severity: CodeSeverity::Warning,
    },
    CodeEntry {
        code: 12,
        name: "blade_worn",
        description: "Blade wear level high",
        severity: CodeSeverity::Warning,
    },
    CodeEntry {
        code: 20,
        name: "docked",
        description: "Mower docked",
        severity: CodeSeverity::Info,
    },
    CodeEntry {
        code: 21,
        name: "schedule_resumed",
        description: "Scheduled mowing resumed",
        severity: CodeSeverity::Info,
    },
];

/// 设备代码解码器（2:2）
///
/// 机型必须在有意义的解码前通过 `set_model` 设置一次
/// （来源：连接时的设备信息）。
#[derive(Debug, Default)]
pub struct DeviceCodeDecoder {
    model: Option<String>,
    code: Option<i64>,
    resolved: Option<DeviceCodeData>,
}

impl DeviceCodeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置机型字符串，用于选择代码表
    pub fn set_model(&mut self, model: impl Into<String>) {
        let model = model.into();
        debug!(%model, "Device model set for code resolution");
        self.model = Some(model);
    }

    /// 解码 2:2 设备代码值
    ///
    /// 返回 `true` 表示代码相对上一次发生了变化（需要通知）；
    /// 相同代码重复到达返回 `false`（不通知）。
    pub fn decode(&mut self, value: &Value) -> Result<bool, DecodeError> {
        let code = value.as_i64().ok_or_else(|| DecodeError::UnexpectedType {
            expected: "integer",
            actual: json_type_name(value).to_string(),
        })?;

        if self.code == Some(code) {
            return Ok(false);
        }

        self.code = Some(code);
        self.resolved = Some(self.resolve(code));
        Ok(true)
    }

    /// 按机型表解析代码
    ///
    /// 机型未设置时给出警告并退回通用表；未收录的代码归为信息级。
    fn resolve(&self, code: i64) -> DeviceCodeData {
        if self.model.is_none() {
            warn!(code, "Device model not set, resolving code against generic table");
        }

        match GENERIC_CODE_TABLE.iter().find(|entry| entry.code == code) {
            Some(entry) => DeviceCodeData {
                code,
                name: entry.name.to_string(),
                description: entry.description.to_string(),
                severity: entry.severity,
            },
            None => DeviceCodeData {
                code,
                name: format!("code_{code}"),
                description: format!("Unknown device code: {code}"),
                severity: CodeSeverity::Info,
            },
        }
    }

    pub fn code(&self) -> Option<i64> {
        self.code
    }

    pub fn current(&self) -> Option<&DeviceCodeData> {
        self.resolved.as_ref()
    }

    pub fn is_error(&self) -> bool {
        matches!(self.resolved, Some(DeviceCodeData { severity: CodeSeverity::Error, .. }))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.resolved, Some(DeviceCodeData { severity: CodeSeverity::Warning, .. }))
    }

    /// 变更通知应进入的通道名（error > warning > info）
    pub fn notification_channel(&self) -> &'static str {
        match self.resolved.as_ref().map(|r| r.severity) {
            Some(CodeSeverity::Error) => DEVICE_CODE_ERROR_PROPERTY_NAME,
            Some(CodeSeverity::Warning) => DEVICE_CODE_WARNING_PROPERTY_NAME,
            _ => DEVICE_CODE_INFO_PROPERTY_NAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_known_error_code() {
        let mut decoder = DeviceCodeDecoder::new();
        decoder.set_model("mower.test.p2255");

        assert!(decoder.decode(&json!(2)).unwrap());
        let data = decoder.current().unwrap();
        assert_eq!(data.name, "lifted");
        assert_eq!(data.severity, CodeSeverity::Error);
        assert!(decoder.is_error());
        assert_eq!(decoder.notification_channel(), DEVICE_CODE_ERROR_PROPERTY_NAME);
    }

    #[test]
    fn test_repeated_code_is_not_a_change() {
        let mut decoder = DeviceCodeDecoder::new();
        decoder.set_model("mower.test.p2255");

        assert!(decoder.decode(&json!(10)).unwrap());
        assert!(!decoder.decode(&json!(10)).unwrap());
        assert!(!decoder.decode(&json!(10)).unwrap());
        assert!(decoder.decode(&json!(0)).unwrap());
    }

    #[test]
    fn test_severity_channels_are_exclusive() {
        let mut decoder = DeviceCodeDecoder::new();
        decoder.set_model("mower.test.p2255");

        decoder.decode(&json!(11)).unwrap();
        assert!(decoder.is_warning());
        assert!(!decoder.is_error());
        assert_eq!(decoder.notification_channel(), DEVICE_CODE_WARNING_PROPERTY_NAME);

        decoder.decode(&json!(20)).unwrap();
        assert!(!decoder.is_warning());
        assert_eq!(decoder.notification_channel(), DEVICE_CODE_INFO_PROPERTY_NAME);
    }

    #[test]
    fn test_unknown_code_resolves_to_generic_info() {
        let mut decoder = DeviceCodeDecoder::new();
        decoder.set_model("mower.test.p2255");

        assert!(decoder.decode(&json!(777)).unwrap());
        let data = decoder.current().unwrap();
        assert_eq!(data.name, "code_777");
        assert_eq!(data.severity, CodeSeverity::Info);
    }

    #[test]
    fn test_non_integer_fails_and_keeps_state() {
        let mut decoder = DeviceCodeDecoder::new();
        decoder.set_model("mower.test.p2255");
        decoder.decode(&json!(1)).unwrap();

        assert!(decoder.decode(&json!("boom")).is_err());
        assert_eq!(decoder.code(), Some(1));
    }
}
