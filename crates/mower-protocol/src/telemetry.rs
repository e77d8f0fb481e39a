//! 复合遥测属性解码（1:1）
//!
//! 1:1 是一个形状不规则的 JSON 对象，目前只有温度字段被逆向确认：
//! `temp` 为十分之一摄氏度的整数（215 → 21.5 °C）。
//! 其余字段保持不解释，缺少 `temp` 即解码失败。

use serde_json::Value;
use tracing::debug;

use crate::error::DecodeError;
use crate::pose_coverage::json_type_name;

/// 复合遥测解码器（1:1）
#[derive(Debug, Default)]
pub struct TelemetryDecoder {
    temperature: Option<f64>,
}

impl TelemetryDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解码 1:1 遥测对象
    pub fn decode(&mut self, value: &Value) -> Result<(), DecodeError> {
        let obj = value.as_object().ok_or_else(|| DecodeError::UnexpectedType {
            expected: "object",
            actual: json_type_name(value).to_string(),
        })?;

        let deci_degrees = obj
            .get("temp")
            .and_then(Value::as_i64)
            .ok_or(DecodeError::MissingField { field: "temp" })?;

        let temperature = deci_degrees as f64 / 10.0;
        debug!(temperature, "Device temperature decoded");
        self.temperature = Some(temperature);
        Ok(())
    }

    /// 最近一次解码出的设备温度（°C）
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }
}
