//! 割草控制状态解码（2:56）
//!
//! 载荷形如 `{"status": [[id, code], ...]}`，取首个条目的第二个元素
//! 作为状态码：0 = 继续，2 = 完成/停止，4 = 暂停。
//!
//! 空 status 数组是**合法**状态（当前无控制指令），与解析失败严格区分。
//! 未知状态码按解码失败处理，留待补充映射。

use num_enum::TryFromPrimitive;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::DecodeError;
use crate::pose_coverage::json_type_name;

/// 割草控制动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive)]
#[repr(i64)]
#[serde(rename_all = "snake_case")]
pub enum MowerControlAction {
    /// 继续作业
    Continue = 0,
    /// 已完成/已停止
    Completed = 2,
    /// 暂停作业
    Pause = 4,
}

/// 控制状态通知载荷
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MowerControlData {
    pub action: Option<MowerControlAction>,
    pub status: Option<i64>,
    pub value: Vec<Vec<i64>>,
}

/// 割草控制状态解码器（2:56）
#[derive(Debug, Default)]
pub struct MowerControlDecoder {
    action: Option<MowerControlAction>,
    status_code: Option<i64>,
    raw_status: Vec<Vec<i64>>,
}

impl MowerControlDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解码 2:56 控制状态值
    pub fn decode(&mut self, value: &Value) -> Result<(), DecodeError> {
        let obj = value.as_object().ok_or_else(|| DecodeError::UnexpectedType {
            expected: "object",
            actual: json_type_name(value).to_string(),
        })?;

        let status = obj
            .get("status")
            .ok_or(DecodeError::MissingField { field: "status" })?;
        let entries = status.as_array().ok_or_else(|| DecodeError::UnexpectedType {
            expected: "status array",
            actual: json_type_name(status).to_string(),
        })?;

        let raw_status: Vec<Vec<i64>> = entries
            .iter()
            .map(|entry| {
                entry
                    .as_array()
                    .and_then(|pair| {
                        pair.iter().map(Value::as_i64).collect::<Option<Vec<i64>>>()
                    })
                    .ok_or_else(|| DecodeError::UnexpectedType {
                        expected: "[id, code] pair",
                        actual: entry.to_string(),
                    })
            })
            .collect::<Result<_, _>>()?;

        // 空数组是合法的"无指令"状态
        if raw_status.is_empty() {
            self.raw_status = raw_status;
            self.status_code = None;
            self.action = None;
            return Ok(());
        }

        let first = &raw_status[0];
        if first.len() < 2 {
            return Err(DecodeError::UnexpectedType {
                expected: "[id, code] pair",
                actual: format!("{:?}", first),
            });
        }

        let code = first[1];
        let action = MowerControlAction::try_from(code).map_err(|_| {
            warn!(code, raw = ?raw_status, "Unknown mower control status code");
            DecodeError::UnknownValue {
                field: "status_code",
                value: code.to_string(),
            }
        })?;

        self.raw_status = raw_status;
        self.status_code = Some(code);
        self.action = Some(action);
        Ok(())
    }

    pub fn action(&self) -> Option<MowerControlAction> {
        self.action
    }

    pub fn status_code(&self) -> Option<i64> {
        self.status_code
    }

    pub fn raw_status(&self) -> &[Vec<i64>] {
        &self.raw_status
    }

    pub fn is_paused(&self) -> bool {
        self.action == Some(MowerControlAction::Pause)
    }

    pub fn is_completed(&self) -> bool {
        self.action == Some(MowerControlAction::Completed)
    }

    /// 通知载荷
    pub fn notification_data(&self) -> MowerControlData {
        MowerControlData {
            action: self.action,
            status: self.status_code,
            value: self.raw_status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_pause() {
        let mut decoder = MowerControlDecoder::new();
        decoder.decode(&json!({"status": [[3, 4]]})).unwrap();
        assert_eq!(decoder.action(), Some(MowerControlAction::Pause));
        assert_eq!(decoder.status_code(), Some(4));
        assert!(decoder.is_paused());
    }

    #[test]
    fn test_decode_pause_any_first_id() {
        // 首元素的 id 不参与判定
        for id in [0, 1, 42, 999] {
            let mut decoder = MowerControlDecoder::new();
            decoder.decode(&json!({"status": [[id, 4]]})).unwrap();
            assert_eq!(decoder.action(), Some(MowerControlAction::Pause));
        }
    }

    #[test]
    fn test_decode_continue_and_completed() {
        let mut decoder = MowerControlDecoder::new();
        decoder.decode(&json!({"status": [[1, 0]]})).unwrap();
        assert_eq!(decoder.action(), Some(MowerControlAction::Continue));

        decoder.decode(&json!({"status": [[1, 2]]})).unwrap();
        assert_eq!(decoder.action(), Some(MowerControlAction::Completed));
        assert!(decoder.is_completed());
    }

    #[test]
    fn test_empty_status_is_valid_no_command() {
        let mut decoder = MowerControlDecoder::new();
        decoder.decode(&json!({"status": [[1, 4]]})).unwrap();

        // 空数组清空动作状态，且不是失败
        decoder.decode(&json!({"status": []})).unwrap();
        assert_eq!(decoder.action(), None);
        assert_eq!(decoder.status_code(), None);
    }

    #[test]
    fn test_unknown_status_code_fails() {
        let mut decoder = MowerControlDecoder::new();
        let err = decoder.decode(&json!({"status": [[1, 99]]})).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownValue { field: "status_code", .. }));
        // 失败不改状态
        assert_eq!(decoder.action(), None);
    }

    #[test]
    fn test_malformed_shapes_fail_without_panic() {
        let mut decoder = MowerControlDecoder::new();
        assert!(decoder.decode(&json!(42)).is_err());
        assert!(decoder.decode(&json!({})).is_err());
        assert!(decoder.decode(&json!({"status": "oops"})).is_err());
        assert!(decoder.decode(&json!({"status": [7]})).is_err());
        assert!(decoder.decode(&json!({"status": [[7]]})).is_err());
    }

    #[test]
    fn test_only_first_entry_decides() {
        let mut decoder = MowerControlDecoder::new();
        decoder.decode(&json!({"status": [[1, 2], [2, 4]]})).unwrap();
        assert_eq!(decoder.action(), Some(MowerControlAction::Completed));
        assert_eq!(decoder.raw_status().len(), 2);
    }
}
