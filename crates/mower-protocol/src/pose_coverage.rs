//! 位姿与覆盖率遥测解码（1:4）
//!
//! 1:4 属性承载割草过程中的二进制遥测，两端以 0xCE 定界：
//!
//! - 去定界后 31 字节 → 完整格式：坐标、航向、分段、当前/总面积
//! - 去定界后 6 字节 → 短格式：仅 x/y 坐标，其余字段保持原状
//! - 其它长度 → 解码失败（未知格式，交由诊断通道众包）
//!
//! 面积字段的线上单位是 centi-sqm（1/100 平方米），解码时 ÷100。
//! 字段偏移为逆向结论，位精确，不得改动；偏移之外的字节含义未知，
//! 保持不解释。

use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::{read_i16_le, read_u16_le};

/// 帧定界字节
pub const SENTINEL_BYTE: u8 = 0xCE;
/// 完整格式的载荷长度（去定界后）
pub const FULL_PAYLOAD_LEN: usize = 31;
/// 短格式的载荷长度（去定界后）
pub const SHORT_PAYLOAD_LEN: usize = 6;
/// 路径历史上限（FIFO，超出淘汰最旧点）
pub const PATH_HISTORY_LIMIT: usize = 1000;

// 完整格式内的字段偏移（0 起）
const X_OFFSET: usize = 0;
const Y_OFFSET: usize = 2;
const HEADING_OFFSET: usize = 6;
const SEGMENT_OFFSET: usize = 22;
const TOTAL_AREA_OFFSET: usize = 25;
const CURRENT_AREA_OFFSET: usize = 28;

/// 路径历史中的单个位置点
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathPoint {
    pub x: i16,
    pub y: i16,
    pub heading: i16,
    pub segment: u16,
}

/// 进度通知载荷
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProgressData {
    pub current_area_sqm: Option<f64>,
    pub total_area_sqm: Option<f64>,
    pub progress_percent: Option<f64>,
}

/// 坐标通知载荷
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CoordinatesData {
    pub x: Option<i16>,
    pub y: Option<i16>,
    pub segment: Option<u16>,
    pub heading: Option<i16>,
}

/// 位姿与覆盖率解码器
///
/// 每台设备一个实例，跨任务存活（整个会话生命周期）。
/// 任务完成标志由两个显式的生命周期信号驱动：
/// `mark_mission_completed`（完成事件或 dock 序列成功）和
/// `reset_mission_completion`（新任务开始）。
#[derive(Debug, Default)]
pub struct PoseCoverageDecoder {
    current_area_sqm: Option<f64>,
    total_area_sqm: Option<f64>,
    progress_percent: Option<f64>,
    mission_completed: bool,

    x: Option<i16>,
    y: Option<i16>,
    segment: Option<u16>,
    heading: Option<i16>,

    path_history: VecDeque<PathPoint>,
}

impl PoseCoverageDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解码一帧 1:4 载荷
    ///
    /// 线上值是 JSON 整数数组（每项一个字节）。定界校验、长度分派、
    /// 字段提取全部失败即返回错误，内部状态保持不变。
    pub fn decode(&mut self, value: &Value) -> Result<(), DecodeError> {
        let bytes = value_to_bytes(value)?;

        if bytes.len() < SHORT_PAYLOAD_LEN + 2 {
            return Err(DecodeError::PayloadTooShort {
                needed: SHORT_PAYLOAD_LEN + 2,
                actual: bytes.len(),
            });
        }

        // 两端定界校验是强制的：长度对但定界错同样判失败
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first != SENTINEL_BYTE || last != SENTINEL_BYTE {
            warn!(start = first, end = last, "Invalid sentinel bytes in pose coverage frame");
            return Err(DecodeError::InvalidSentinel { start: first, end: last });
        }

        let payload = &bytes[1..bytes.len() - 1];
        match payload.len() {
            FULL_PAYLOAD_LEN => self.decode_full(payload),
            SHORT_PAYLOAD_LEN => self.decode_short(payload),
            len => {
                warn!(len, "Unknown pose coverage payload length");
                Err(DecodeError::UnknownPayloadLength { len })
            },
        }
    }

    /// 完整格式（31 字节）：坐标 + 航向 + 分段 + 面积
    fn decode_full(&mut self, payload: &[u8]) -> Result<(), DecodeError> {
        let x = read_i16_le(payload, X_OFFSET)?;
        let y = read_i16_le(payload, Y_OFFSET)?;
        let heading = read_i16_le(payload, HEADING_OFFSET)?;
        let segment = read_u16_le(payload, SEGMENT_OFFSET)?;
        let total_area_centisqm = read_u16_le(payload, TOTAL_AREA_OFFSET)?;
        let current_area_centisqm = read_u16_le(payload, CURRENT_AREA_OFFSET)?;

        let current_area_sqm = f64::from(current_area_centisqm) / 100.0;
        let total_area_sqm = f64::from(total_area_centisqm) / 100.0;

        let mut progress_percent = if total_area_sqm > 0.0 {
            (current_area_sqm / total_area_sqm * 100.0).min(100.0)
        } else {
            0.0
        };

        // 任务已完成且有实际进度时钳位到 100%；
        // 零进度的任务不强制（从未开始的任务不该显示 100%）
        if self.mission_completed && progress_percent > 0.0 {
            progress_percent = 100.0;
        }

        self.x = Some(x);
        self.y = Some(y);
        self.heading = Some(heading);
        self.segment = Some(segment);
        self.current_area_sqm = Some(current_area_sqm);
        self.total_area_sqm = Some(total_area_sqm);
        self.progress_percent = Some(progress_percent);

        self.path_history.push_back(PathPoint { x, y, heading, segment });
        if self.path_history.len() > PATH_HISTORY_LIMIT {
            self.path_history.pop_front();
        }

        Ok(())
    }

    /// 短格式（6 字节）：仅 x/y，其余字节含义未知
    fn decode_short(&mut self, payload: &[u8]) -> Result<(), DecodeError> {
        let x = read_i16_le(payload, X_OFFSET)?;
        let y = read_i16_le(payload, Y_OFFSET)?;

        self.x = Some(x);
        self.y = Some(y);

        debug!(x, y, "Short pose coverage frame decoded");
        Ok(())
    }

    /// 标记任务完成
    ///
    /// 完成事件到达时面积进度常停在略低于 100%（如 96%），
    /// 此时钳位到 100%。从未观测到进度的任务保持原状。
    pub fn mark_mission_completed(&mut self) {
        self.mission_completed = true;
        if let Some(p) = self.progress_percent {
            if p > 0.0 {
                self.progress_percent = Some(100.0);
            }
        }
        debug!("Mission marked as completed");
    }

    /// 重置任务完成标志（新任务开始时调用）
    pub fn reset_mission_completion(&mut self) {
        self.mission_completed = false;
        debug!("Mission completion flag reset");
    }

    /// 清空路径历史
    pub fn clear_path_history(&mut self) {
        self.path_history.clear();
    }

    // ==================== 读取接口 ====================

    pub fn mission_completed(&self) -> bool {
        self.mission_completed
    }

    pub fn progress_percent(&self) -> Option<f64> {
        self.progress_percent
    }

    pub fn current_area_sqm(&self) -> Option<f64> {
        self.current_area_sqm
    }

    pub fn total_area_sqm(&self) -> Option<f64> {
        self.total_area_sqm
    }

    pub fn coordinates(&self) -> Option<(i16, i16)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    pub fn segment(&self) -> Option<u16> {
        self.segment
    }

    pub fn heading(&self) -> Option<i16> {
        self.heading
    }

    pub fn path_history(&self) -> Vec<PathPoint> {
        self.path_history.iter().copied().collect()
    }

    /// 路径历史点数（不拷贝）
    pub fn path_history_len(&self) -> usize {
        self.path_history.len()
    }

    /// 进度通知载荷（每次成功解码可独立订阅）
    pub fn progress_data(&self) -> ProgressData {
        ProgressData {
            current_area_sqm: self.current_area_sqm,
            total_area_sqm: self.total_area_sqm,
            progress_percent: self.progress_percent,
        }
    }

    /// 坐标通知载荷（每次成功解码可独立订阅）
    pub fn coordinates_data(&self) -> CoordinatesData {
        CoordinatesData {
            x: self.x,
            y: self.y,
            segment: self.segment,
            heading: self.heading,
        }
    }
}

/// 把 JSON 整数数组转成字节序列
fn value_to_bytes(value: &Value) -> Result<Vec<u8>, DecodeError> {
    let arr = value.as_array().ok_or_else(|| DecodeError::UnexpectedType {
        expected: "byte array",
        actual: json_type_name(value).to_string(),
    })?;

    arr.iter()
        .map(|v| {
            v.as_u64()
                .and_then(|b| u8::try_from(b).ok())
                .ok_or_else(|| DecodeError::UnexpectedType {
                    expected: "byte (0-255)",
                    actual: v.to_string(),
                })
        })
        .collect()
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
