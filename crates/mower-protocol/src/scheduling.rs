//! 任务调度属性族解码（2:50 / 2:51 / 2:52）
//!
//! 三个互不共享状态的子解码器：
//!
//! - 2:50 任务描述：`t` 类型标签 + 嵌套 `d` 对象（必需 `exe`/`o`/`status`，
//!   可选 `area_id`/`region_id`/`time`）
//! - 2:51 设置变更回显：任意对象即合法，纯透传记录
//! - 2:52 任务摘要：空对象合法（任务结束、暂无摘要），留作未来扩展
//!
//! 可选字段缺席时保持 `None`，与"上报为零/空"严格区分
//! （暂停/停靠状态下设备会省略这些字段）。

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::DecodeError;
use crate::pose_coverage::json_type_name;

/// 任务类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskType {
    Task,
    Unknown,
}

/// 任务描述通知载荷
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskData {
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub area_id: Option<Vec<i64>>,
    pub execution_active: bool,
    pub coverage_target: i64,
    pub region_id: Option<Vec<i64>>,
    pub task_active: bool,
    pub elapsed_time: Option<i64>,
}

/// 任务描述解码器（2:50）
#[derive(Debug, Default)]
pub struct TaskDecoder {
    task: Option<TaskData>,
}

impl TaskDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解码任务描述
    ///
    /// 必需字段缺失即失败，失败不改状态。
    pub fn decode(&mut self, value: &Value) -> Result<(), DecodeError> {
        let obj = value.as_object().ok_or_else(|| DecodeError::UnexpectedType {
            expected: "object",
            actual: json_type_name(value).to_string(),
        })?;

        let type_tag = obj
            .get("t")
            .and_then(Value::as_str)
            .ok_or(DecodeError::MissingField { field: "t" })?;
        let task_type = if type_tag == "TASK" { TaskType::Task } else { TaskType::Unknown };

        let data = obj
            .get("d")
            .ok_or(DecodeError::MissingField { field: "d" })?
            .as_object()
            .ok_or_else(|| DecodeError::UnexpectedType {
                expected: "task data object",
                actual: "non-object".to_string(),
            })?;

        let execution_active = data
            .get("exe")
            .and_then(Value::as_bool)
            .ok_or(DecodeError::MissingField { field: "exe" })?;
        let coverage_target = data
            .get("o")
            .and_then(Value::as_i64)
            .ok_or(DecodeError::MissingField { field: "o" })?;
        let task_active = data
            .get("status")
            .and_then(Value::as_bool)
            .ok_or(DecodeError::MissingField { field: "status" })?;

        // 可选字段：缺席即 None，不折算成零值
        let area_id = data.get("area_id").and_then(as_i64_vec);
        let region_id = data.get("region_id").and_then(as_i64_vec);
        let elapsed_time = data.get("time").and_then(Value::as_i64);

        let task = TaskData {
            task_type,
            area_id,
            execution_active,
            coverage_target,
            region_id,
            task_active,
            elapsed_time,
        };
        debug!(?task, "Task descriptor decoded");
        self.task = Some(task);
        Ok(())
    }

    pub fn task(&self) -> Option<&TaskData> {
        self.task.as_ref()
    }
}

fn as_i64_vec(value: &Value) -> Option<Vec<i64>> {
    value.as_array().map(|arr| arr.iter().filter_map(Value::as_i64).collect())
}

/// 设置变更回显解码器（2:51）
///
/// 任意设置被修改时设备回报一条对象消息，不与具体功能绑定，
/// 这里仅记录最近一次的内容。
#[derive(Debug, Default)]
pub struct SettingsEchoDecoder {
    last_value: Option<Map<String, Value>>,
}

impl SettingsEchoDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, value: &Value) -> Result<(), DecodeError> {
        let obj = value.as_object().ok_or_else(|| DecodeError::UnexpectedType {
            expected: "object",
            actual: json_type_name(value).to_string(),
        })?;
        let settings = Value::Object(obj.clone());
        info!(%settings, "Settings change acknowledged");
        self.last_value = Some(obj.clone());
        Ok(())
    }

    pub fn last_value(&self) -> Option<&Map<String, Value>> {
        self.last_value.as_ref()
    }
}

/// 任务摘要解码器（2:52）
///
/// 目前设备只发空对象（标记任务结束），非空对象留作未来使用。
#[derive(Debug, Default)]
pub struct SummaryDecoder {
    summary: Map<String, Value>,
}

impl SummaryDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, value: &Value) -> Result<(), DecodeError> {
        let obj = value.as_object().ok_or_else(|| DecodeError::UnexpectedType {
            expected: "object",
            actual: json_type_name(value).to_string(),
        })?;

        self.summary = obj.clone();
        if self.summary.is_empty() {
            debug!("Mission completion marker received (empty summary)");
        } else {
            let summary = Value::Object(obj.clone());
            info!(%summary, "Mission completed");
        }
        Ok(())
    }

    pub fn summary(&self) -> &Map<String, Value> {
        &self.summary
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_decode_minimal() {
        // 真实消息：{'d': {'exe': True, 'o': 4, 'status': True}, 't': 'TASK'}
        let mut decoder = TaskDecoder::new();
        decoder
            .decode(&json!({"t": "TASK", "d": {"exe": true, "o": 4, "status": true}}))
            .unwrap();

        let task = decoder.task().unwrap();
        assert_eq!(task.task_type, TaskType::Task);
        assert!(task.execution_active);
        assert_eq!(task.coverage_target, 4);
        assert!(task.task_active);
        // 可选字段缺席 → None，不是零
        assert_eq!(task.area_id, None);
        assert_eq!(task.region_id, None);
        assert_eq!(task.elapsed_time, None);
    }

    #[test]
    fn test_task_decode_full() {
        let mut decoder = TaskDecoder::new();
        decoder
            .decode(&json!({
                "t": "TASK",
                "d": {
                    "exe": false,
                    "o": 100,
                    "status": false,
                    "area_id": [1, 2],
                    "region_id": [3],
                    "time": 1800
                }
            }))
            .unwrap();

        let task = decoder.task().unwrap();
        assert_eq!(task.area_id, Some(vec![1, 2]));
        assert_eq!(task.region_id, Some(vec![3]));
        assert_eq!(task.elapsed_time, Some(1800));
    }

    #[test]
    fn test_task_unknown_type_tag() {
        let mut decoder = TaskDecoder::new();
        decoder
            .decode(&json!({"t": "SOMETHING", "d": {"exe": true, "o": 4, "status": true}}))
            .unwrap();
        assert_eq!(decoder.task().unwrap().task_type, TaskType::Unknown);
    }

    #[test]
    fn test_task_missing_required_fields_fail() {
        for missing in ["exe", "o", "status"] {
            let mut d = serde_json::Map::new();
            d.insert("exe".into(), json!(true));
            d.insert("o".into(), json!(4));
            d.insert("status".into(), json!(true));
            d.remove(missing);

            let mut decoder = TaskDecoder::new();
            let err = decoder.decode(&json!({"t": "TASK", "d": d})).unwrap_err();
            assert!(
                matches!(err, DecodeError::MissingField { .. }),
                "expected MissingField for {missing}, got {err:?}"
            );
            assert!(decoder.task().is_none());
        }
    }

    #[test]
    fn test_task_non_object_fails() {
        let mut decoder = TaskDecoder::new();
        assert!(decoder.decode(&json!([1, 2, 3])).is_err());
        assert!(decoder.decode(&json!({"t": "TASK", "d": 7})).is_err());
    }

    #[test]
    fn test_settings_echo_accepts_any_object() {
        let mut decoder = SettingsEchoDecoder::new();
        decoder.decode(&json!({"whatever": {"nested": true}})).unwrap();
        assert!(decoder.last_value().unwrap().contains_key("whatever"));

        assert!(decoder.decode(&json!("not a dict")).is_err());
        assert!(decoder.decode(&json!(7)).is_err());
    }

    #[test]
    fn test_summary_empty_object_is_valid() {
        // 真实消息：{'piid': 52, 'siid': 2, 'value': {}}
        let mut decoder = SummaryDecoder::new();
        decoder.decode(&json!({})).unwrap();
        assert!(decoder.is_empty());

        decoder.decode(&json!({"duration": 45})).unwrap();
        assert!(!decoder.is_empty());
        assert_eq!(decoder.summary().get("duration"), Some(&json!(45)));
    }

    #[test]
    fn test_summary_non_object_fails() {
        let mut decoder = SummaryDecoder::new();
        assert!(decoder.decode(&json!(null)).is_err());
        assert!(decoder.decode(&json!([])).is_err());
    }
}
