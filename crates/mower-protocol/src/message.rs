//! 入站消息模型
//!
//! 传输层交付的是已经 JSON 反序列化的原始消息，本模块在边界处
//! 一次性解码为强类型的标签联合，之后的分发不再做鸭子类型判断。
//!
//! 三种已知 method：
//!
//! ```text
//! {method: "properties_changed", params: [{siid, piid, value?}, ...]}
//! {method: "event_occured",      params: {siid, eiid, arguments: [...]}}
//! {method: "props",              params: {<key>: <value>, ...}}
//! ```
//!
//! 注意 `event_occured` 的拼写来自设备固件，保持原样。

use serde_json::{Map, Value};

/// 单条属性更新（properties_changed 数组元素）
///
/// Service 1 的会话标志（1:50 / 1:51 / 1:52）不携带 `value` 字段，
/// 仅凭出现即生效，因此 `value` 是可选的。
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyUpdate {
    pub siid: i32,
    pub piid: i32,
    pub value: Option<Value>,
}

/// 事件参数（event_occured 的 arguments 数组元素）
#[derive(Debug, Clone, PartialEq)]
pub struct EventArgument {
    pub piid: i32,
    pub value: Value,
}

/// 入站消息的标签联合
///
/// 无法识别的消息保留原始 JSON，由上层转发到诊断通道。
#[derive(Debug, Clone, PartialEq)]
pub enum MowerMessage {
    /// 属性变更推送
    PropertiesChanged(Vec<PropertyUpdate>),
    /// 事件推送
    EventOccurred {
        siid: i32,
        eiid: i32,
        arguments: Vec<EventArgument>,
    },
    /// 简单键值属性推送（历史上携带较多噪声）
    Props(Map<String, Value>),
    /// 未识别的消息形状
    Unknown(Value),
}

impl MowerMessage {
    /// 从原始 JSON 解码入站消息
    ///
    /// 解码永不失败：不认识的形状落入 `Unknown`，
    /// 保留原始值供诊断通知使用。
    pub fn from_value(raw: Value) -> Self {
        let Some(obj) = raw.as_object() else {
            return MowerMessage::Unknown(raw);
        };

        match obj.get("method").and_then(Value::as_str) {
            Some("properties_changed") => {
                let Some(params) = obj.get("params").and_then(Value::as_array) else {
                    return MowerMessage::Unknown(raw);
                };
                let updates: Vec<PropertyUpdate> =
                    params.iter().filter_map(parse_property_update).collect();
                if updates.is_empty() {
                    return MowerMessage::Unknown(raw);
                }
                MowerMessage::PropertiesChanged(updates)
            },
            Some("event_occured") => {
                let Some(params) = obj.get("params").and_then(Value::as_object) else {
                    return MowerMessage::Unknown(raw);
                };
                let (Some(siid), Some(eiid)) = (
                    params.get("siid").and_then(as_i32),
                    params.get("eiid").and_then(as_i32),
                ) else {
                    return MowerMessage::Unknown(raw);
                };
                let arguments = params
                    .get("arguments")
                    .and_then(Value::as_array)
                    .map(|args| args.iter().filter_map(parse_event_argument).collect())
                    .unwrap_or_default();
                MowerMessage::EventOccurred { siid, eiid, arguments }
            },
            Some("props") => match obj.get("params").and_then(Value::as_object) {
                Some(params) => MowerMessage::Props(params.clone()),
                None => MowerMessage::Unknown(raw),
            },
            _ => MowerMessage::Unknown(raw),
        }
    }
}

fn as_i32(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|v| i32::try_from(v).ok())
}

fn parse_property_update(param: &Value) -> Option<PropertyUpdate> {
    let obj = param.as_object()?;
    Some(PropertyUpdate {
        siid: obj.get("siid").and_then(as_i32)?,
        piid: obj.get("piid").and_then(as_i32)?,
        value: obj.get("value").cloned(),
    })
}

fn parse_event_argument(arg: &Value) -> Option<EventArgument> {
    let obj = arg.as_object()?;
    Some(EventArgument {
        piid: obj.get("piid").and_then(as_i32)?,
        value: obj.get("value").cloned().unwrap_or(Value::Null),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_properties_changed() {
        let raw = json!({
            "id": 123,
            "method": "properties_changed",
            "params": [
                {"did": "-1******95", "siid": 3, "piid": 1, "value": 75}
            ]
        });
        let msg = MowerMessage::from_value(raw);
        match msg {
            MowerMessage::PropertiesChanged(updates) => {
                assert_eq!(updates.len(), 1);
                assert_eq!(updates[0].siid, 3);
                assert_eq!(updates[0].piid, 1);
                assert_eq!(updates[0].value, Some(json!(75)));
            },
            other => panic!("Expected PropertiesChanged, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_property_without_value() {
        // 1:50 会话标志不带 value 字段
        let raw = json!({
            "id": 305,
            "method": "properties_changed",
            "params": [{"did": "-1******95", "piid": 50, "siid": 1}]
        });
        match MowerMessage::from_value(raw) {
            MowerMessage::PropertiesChanged(updates) => {
                assert_eq!(updates[0].piid, 50);
                assert_eq!(updates[0].value, None);
            },
            other => panic!("Expected PropertiesChanged, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_event_occurred() {
        let raw = json!({
            "method": "event_occured",
            "params": {
                "siid": 4,
                "eiid": 1,
                "arguments": [
                    {"piid": 1, "value": 96},
                    {"piid": 2, "value": 45}
                ]
            }
        });
        match MowerMessage::from_value(raw) {
            MowerMessage::EventOccurred { siid, eiid, arguments } => {
                assert_eq!((siid, eiid), (4, 1));
                assert_eq!(arguments.len(), 2);
                assert_eq!(arguments[0].value, json!(96));
            },
            other => panic!("Expected EventOccurred, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_event_without_arguments() {
        let raw = json!({
            "method": "event_occured",
            "params": {"did": "-1******18", "eiid": 1, "siid": 1}
        });
        match MowerMessage::from_value(raw) {
            MowerMessage::EventOccurred { siid, eiid, arguments } => {
                assert_eq!((siid, eiid), (1, 1));
                assert!(arguments.is_empty());
            },
            other => panic!("Expected EventOccurred, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_props() {
        let raw = json!({
            "method": "props",
            "params": {"ota_state": "idle"}
        });
        match MowerMessage::from_value(raw) {
            MowerMessage::Props(params) => {
                assert_eq!(params.get("ota_state"), Some(&json!("idle")));
            },
            other => panic!("Expected Props, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_method_preserves_raw() {
        let raw = json!({"method": "something_new", "params": 42});
        match MowerMessage::from_value(raw.clone()) {
            MowerMessage::Unknown(v) => assert_eq!(v, raw),
            other => panic!("Expected Unknown, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_params_is_unknown() {
        let raw = json!({"method": "properties_changed", "params": "oops"});
        assert!(matches!(MowerMessage::from_value(raw), MowerMessage::Unknown(_)));

        let raw = json!({"method": "event_occured", "params": {"siid": 4}});
        assert!(matches!(MowerMessage::from_value(raw), MowerMessage::Unknown(_)));
    }
}
