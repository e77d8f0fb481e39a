//! Service 5 电源遥测解码（5:104 - 5:108）
//!
//! 统一处理五个电源相关属性：
//!
//! - 5:104 任务状态码（带文字描述；未知码仍按已处理对待，给通用描述）
//! - 5:105 含义未知的整数
//! - 5:106 BMS 微相位代码
//! - 5:107 能量/放电指数
//! - 5:108 含义未知的整数
//!
//! 与 2:63 不同，5:104 的未知取值**不**走众包路径：该属性出现频繁，
//! 把每个新码都推到诊断通道只会淹没有用信息。

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::DecodeError;
use crate::ids::{
    BMS_PHASE_PROPERTY, SERVICE5_ENERGY_INDEX_PROPERTY, SERVICE5_PROPERTY_105,
    SERVICE5_PROPERTY_108, TASK_STATUS_PROPERTY,
};
use crate::pose_coverage::json_type_name;

/// 任务状态通知载荷（5:104）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStatusData {
    pub status_code: i64,
    pub status_description: String,
}

/// 已知任务状态码的描述
fn task_status_description(code: i64) -> String {
    match code {
        0 => "No active task".to_string(),
        1 => "Task in progress".to_string(),
        2 => "Task completed".to_string(),
        3 => "Task interrupted".to_string(),
        7 => "Task incomplete - spot mowing".to_string(),
        other => format!("Unknown task status: {other}"),
    }
}

/// Service 5 遥测解码器
#[derive(Debug, Default)]
pub struct Service5Decoder {
    task_status_code: Option<i64>,
    property_105: Option<i64>,
    bms_phase: Option<i64>,
    energy_index: Option<i64>,
    property_108: Option<i64>,
}

impl Service5Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否由本解码器处理
    pub fn handles(siid: i32, piid: i32) -> bool {
        TASK_STATUS_PROPERTY.matches(siid, piid)
            || SERVICE5_PROPERTY_105.matches(siid, piid)
            || BMS_PHASE_PROPERTY.matches(siid, piid)
            || SERVICE5_ENERGY_INDEX_PROPERTY.matches(siid, piid)
            || SERVICE5_PROPERTY_108.matches(siid, piid)
    }

    /// 解码一条 Service 5 属性更新
    ///
    /// 返回变化后的 (通知名, 通知值)；值未变化时返回 `None`（不通知）。
    pub fn decode(
        &mut self,
        siid: i32,
        piid: i32,
        value: &Value,
    ) -> Result<Option<(&'static str, Value)>, DecodeError> {
        let int_value = value.as_i64().ok_or_else(|| DecodeError::UnexpectedType {
            expected: "integer",
            actual: json_type_name(value).to_string(),
        })?;

        if TASK_STATUS_PROPERTY.matches(siid, piid) {
            let changed = self.task_status_code != Some(int_value);
            self.task_status_code = Some(int_value);
            if !changed {
                return Ok(None);
            }
            let data = TaskStatusData {
                status_code: int_value,
                status_description: task_status_description(int_value),
            };
            debug!(code = int_value, desc = %data.status_description, "Task status updated");
            let payload = serde_json::to_value(data).unwrap_or(Value::Null);
            return Ok(Some((TASK_STATUS_PROPERTY.name, payload)));
        }

        let slot: (&mut Option<i64>, &'static str) = if SERVICE5_PROPERTY_105.matches(siid, piid) {
            (&mut self.property_105, SERVICE5_PROPERTY_105.name)
        } else if BMS_PHASE_PROPERTY.matches(siid, piid) {
            (&mut self.bms_phase, BMS_PHASE_PROPERTY.name)
        } else if SERVICE5_ENERGY_INDEX_PROPERTY.matches(siid, piid) {
            (&mut self.energy_index, SERVICE5_ENERGY_INDEX_PROPERTY.name)
        } else if SERVICE5_PROPERTY_108.matches(siid, piid) {
            (&mut self.property_108, SERVICE5_PROPERTY_108.name)
        } else {
            return Err(DecodeError::UnknownValue {
                field: "service5 property",
                value: format!("{siid}:{piid}"),
            });
        };

        let (state, name) = slot;
        let changed = *state != Some(int_value);
        *state = Some(int_value);
        Ok(changed.then(|| (name, Value::from(int_value))))
    }

    pub fn task_status_code(&self) -> Option<i64> {
        self.task_status_code
    }

    pub fn property_105(&self) -> Option<i64> {
        self.property_105
    }

    pub fn bms_phase(&self) -> Option<i64> {
        self.bms_phase
    }

    pub fn energy_index(&self) -> Option<i64> {
        self.energy_index
    }

    pub fn property_108(&self) -> Option<i64> {
        self.property_108
    }
}
