//! 设备状态聚合
//!
//! 每台割草机一个 [`MowerDevice`]：持有全部解码器与标量状态，
//! 把 MQTT 推送与 REST 拉取汇聚到同一套状态上。
//!
//! ## 并发模型
//!
//! 写路径（消息分发、设备信息刷新）由单把 `parking_lot::Mutex` 串行化；
//! 读路径通过 `ArcSwap` 快照做无锁读取。锁内只做解码与状态更新，
//! 通知回调与传输调用全部在锁外执行。
//!
//! ## 诊断通道
//!
//! `properties_changed` 中解码失败或无人认领的属性会把**整条原始消息**
//! 转发到 `unhandled_mqtt` 通知（众包策略）；`props` 路径的未知键
//! 只记录日志，不进诊断通道。

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::DeviceConfig;
use crate::error::DeviceError;
use crate::observer::{CallbackHandle, ObserverRegistry, PropertyCallback};
use crate::signal::CompletionSignal;
use crate::transport::CloudTransport;

use mower_protocol::{
    ACTION_DOCK, ACTION_PAUSE, ACTION_START_MOWING, ACTION_STOP, BATTERY_PROPERTY,
    BLUETOOTH_PROPERTY, CHARGING_STATUS_PROPERTY, ChargingStatus,
    CoordinatesData, DEVICE_CODE_PROPERTY, DEVICE_FILE_PATH_PROPERTY, DEVICE_TELEMETRY_PROPERTY,
    DecodeError, DeviceCodeDecoder, EventArgument, FIRMWARE_DOWNLOAD_PROGRESS_PROPERTY,
    FIRMWARE_INSTALL_STATE_PROPERTY, FIRMWARE_VALIDATION_EVENT, FirmwareInstallState,
    MISSION_COMPLETION_EVENT, MOWER_CONTROL_STATUS_PROPERTY, MowerControlDecoder, MowerMessage,
    POSE_COVERAGE_PROPERTY, POWER_STATE_PROPERTY, PathPoint, PoseCoverageDecoder, ProgressData,
    PropertyUpdate, SCHEDULING_SETTINGS_ECHO_PROPERTY, SCHEDULING_SUMMARY_PROPERTY,
    SCHEDULING_TASK_PROPERTY, SERVICE1_COMPLETION_FLAG_PROPERTY, SERVICE1_PROPERTY_50,
    SERVICE1_PROPERTY_51, SERVICE2_PROPERTY_60, SERVICE2_PROPERTY_62, SERVICE2_PROPERTY_63,
    SERVICE2_PROPERTY_64, SERVICE2_PROPERTY_65, STATUS_CODE_MOWING, STATUS_PROPERTY,
    SettingsEchoDecoder, Service5Decoder, SummaryDecoder, TASK_NAV_DOCK, TaskDecoder,
    TelemetryDecoder, json_status_payload, status_name,
};

/// 诊断通知名：解码失败或无人认领的入站消息
pub const UNHANDLED_MQTT_PROPERTY_NAME: &str = "unhandled_mqtt";
/// 活动状态通知名（命令序列推进时触发）
pub const ACTIVITY_PROPERTY_NAME: &str = "activity";
/// OTA 状态通知名（props 路径）
pub const OTA_STATE_PROPERTY_NAME: &str = "ota_state";
/// 进度通知名（1:4 解码成功或任务完成时触发）
pub const MOWING_PROGRESS_PROPERTY_NAME: &str = "mowing_progress";
/// 坐标通知名（1:4 解码成功时触发）
pub const MOWING_COORDINATES_PROPERTY_NAME: &str = "mowing_coordinates";
/// 固件版本通知名（REST 拉取发现版本变化时触发）
pub const FIRMWARE_VERSION_PROPERTY_NAME: &str = "firmware_version";

/// 无锁读取的状态快照
///
/// 每次写路径结束时整体重建并原子替换，读取方持有的快照
/// 在替换后依然自洽（不会看到半更新状态）。
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceSnapshot {
    pub battery_percent: Option<i64>,
    pub status_code: Option<i64>,
    pub status_name: Option<String>,
    pub charging_status: Option<ChargingStatus>,
    pub bluetooth_connected: Option<bool>,
    pub temperature_c: Option<f64>,

    pub firmware_version: Option<String>,
    pub firmware_install_state: Option<FirmwareInstallState>,
    pub firmware_download_progress: Option<i64>,
    pub ota_state: Option<String>,
    pub device_file_path: Option<String>,

    pub progress: ProgressData,
    pub coordinates: CoordinatesData,
    pub mission_completed: bool,
    pub path_history_len: usize,

    pub task_status_code: Option<i64>,
    pub task_nav_state: Option<String>,
    pub power_state: Option<i64>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
}

/// 锁保护的可变状态：解码器 + 标量
#[derive(Default)]
struct DeviceState {
    pose: PoseCoverageDecoder,
    control: MowerControlDecoder,
    device_code: DeviceCodeDecoder,
    task: TaskDecoder,
    settings_echo: SettingsEchoDecoder,
    summary: SummaryDecoder,
    service5: Service5Decoder,
    telemetry: TelemetryDecoder,

    battery_percent: Option<i64>,
    status_code: Option<i64>,
    charging_status: Option<ChargingStatus>,
    bluetooth_connected: Option<bool>,

    firmware_version: Option<String>,
    firmware_install_state: Option<FirmwareInstallState>,
    firmware_download_progress: Option<i64>,
    ota_state: Option<String>,
    device_file_path: Option<String>,

    task_nav_state: Option<String>,
    power_state: Option<i64>,

    model: Option<String>,
    serial_number: Option<String>,
}

impl DeviceState {
    fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            battery_percent: self.battery_percent,
            status_code: self.status_code,
            status_name: self.status_code.map(status_name),
            charging_status: self.charging_status,
            bluetooth_connected: self.bluetooth_connected,
            temperature_c: self.telemetry.temperature(),
            firmware_version: self.firmware_version.clone(),
            firmware_install_state: self.firmware_install_state,
            firmware_download_progress: self.firmware_download_progress,
            ota_state: self.ota_state.clone(),
            device_file_path: self.device_file_path.clone(),
            progress: self.pose.progress_data(),
            coordinates: self.pose.coordinates_data(),
            mission_completed: self.pose.mission_completed(),
            path_history_len: self.pose.path_history_len(),
            task_status_code: self.service5.task_status_code(),
            task_nav_state: self.task_nav_state.clone(),
            power_state: self.power_state,
            model: self.model.clone(),
            serial_number: self.serial_number.clone(),
        }
    }
}

/// 单台设备的状态聚合与命令入口
pub struct MowerDevice {
    transport: Arc<dyn CloudTransport>,
    config: DeviceConfig,
    inner: Mutex<DeviceState>,
    snapshot: ArcSwap<DeviceSnapshot>,
    observers: ObserverRegistry,
    completion: CompletionSignal,
}

impl MowerDevice {
    pub fn new(transport: Arc<dyn CloudTransport>, config: DeviceConfig) -> Self {
        Self {
            transport,
            config,
            inner: Mutex::new(DeviceState::default()),
            snapshot: ArcSwap::from_pointee(DeviceSnapshot::default()),
            observers: ObserverRegistry::new(),
            completion: CompletionSignal::new(),
        }
    }

    /// 当前状态快照（无锁）
    pub fn snapshot(&self) -> Arc<DeviceSnapshot> {
        self.snapshot.load_full()
    }

    /// 路径历史副本（需要短暂持锁）
    pub fn path_history(&self) -> Vec<PathPoint> {
        self.inner.lock().pose.path_history()
    }

    /// 注册属性变更回调
    pub fn register_callback(&self, callback: PropertyCallback) -> CallbackHandle {
        self.observers.register(callback)
    }

    /// 注销属性变更回调
    pub fn unregister_callback(&self, handle: CallbackHandle) {
        self.observers.unregister(handle)
    }

    // ==================== 入站消息处理 ====================

    /// 处理一条入站云端消息
    ///
    /// 永不失败：解码失败转为 `unhandled_mqtt` 诊断通知。
    /// 通知在锁外、按注册顺序同步触发。
    pub fn handle_message(&self, raw: Value) {
        let message = MowerMessage::from_value(raw.clone());
        let mut pending: Vec<(String, Value)> = Vec::new();
        let mut escalate = false;

        {
            let mut state = self.inner.lock();
            match message {
                MowerMessage::PropertiesChanged(updates) => {
                    // 每条属性独立分发：一条失败不影响其余条目
                    for update in &updates {
                        if let Err(err) = self.dispatch_property(&mut state, update, &mut pending) {
                            warn!(
                                siid = update.siid,
                                piid = update.piid,
                                %err,
                                "Property update not handled"
                            );
                            escalate = true;
                        }
                    }
                },
                MowerMessage::EventOccurred { siid, eiid, arguments } => {
                    if !self.dispatch_event(&mut state, siid, eiid, &arguments, &mut pending) {
                        warn!(siid, eiid, "Unknown event");
                        escalate = true;
                    }
                },
                MowerMessage::Props(params) => {
                    // props 路径历史上噪声多：未知键只记日志，不进诊断通道
                    for (key, value) in &params {
                        match key.as_str() {
                            "ota_state" => {
                                if let Some(ota) = value.as_str() {
                                    state.ota_state = Some(ota.to_string());
                                    pending.push((
                                        OTA_STATE_PROPERTY_NAME.to_string(),
                                        value.clone(),
                                    ));
                                }
                            },
                            other => debug!(key = other, "Unrecognized props key ignored"),
                        }
                    }
                },
                MowerMessage::Unknown(_) => {
                    warn!("Unrecognized message shape");
                    escalate = true;
                },
            }

            self.snapshot.store(Arc::new(state.snapshot()));
        }

        if escalate {
            pending.push((UNHANDLED_MQTT_PROPERTY_NAME.to_string(), raw));
        }
        self.fire(pending);
    }

    /// 分发一条属性更新（锁内调用）
    ///
    /// 返回错误表示该条目需要进入诊断通道。
    fn dispatch_property(
        &self,
        state: &mut DeviceState,
        update: &PropertyUpdate,
        pending: &mut Vec<(String, Value)>,
    ) -> Result<(), DecodeError> {
        let (siid, piid) = (update.siid, update.piid);

        // Service 1 的会话标志仅凭出现即生效，可以没有 value 字段
        if SERVICE1_PROPERTY_50.matches(siid, piid) || SERVICE1_PROPERTY_51.matches(siid, piid) {
            let id = if piid == 50 { SERVICE1_PROPERTY_50 } else { SERVICE1_PROPERTY_51 };
            debug!(name = id.name, "Session start indicator received");
            pending.push((id.name.to_string(), update.value.clone().unwrap_or(Value::Null)));
            return Ok(());
        }
        if SERVICE1_COMPLETION_FLAG_PROPERTY.matches(siid, piid) {
            debug!("Post-completion flag received");
            pending.push((
                SERVICE1_COMPLETION_FLAG_PROPERTY.name.to_string(),
                update.value.clone().unwrap_or(Value::Null),
            ));
            return Ok(());
        }

        // 其余属性都要求携带 value
        let value = update
            .value
            .as_ref()
            .ok_or(DecodeError::MissingField { field: "value" })?;

        if BATTERY_PROPERTY.matches(siid, piid) {
            let percent = as_int(value)?;
            // 标量属性只在值变化时通知，重复到达是空操作
            if state.battery_percent != Some(percent) {
                state.battery_percent = Some(percent);
                pending.push((BATTERY_PROPERTY.name.to_string(), json!(percent)));
            }
        } else if STATUS_PROPERTY.matches(siid, piid) {
            let code = as_int(value)?;
            if state.status_code != Some(code) {
                // 割草状态到达意味着新任务开始：重置完成标志
                if code == STATUS_CODE_MOWING {
                    state.pose.reset_mission_completion();
                }
                state.status_code = Some(code);
                pending.push((STATUS_PROPERTY.name.to_string(), json_status_payload(code)));
            }
        } else if CHARGING_STATUS_PROPERTY.matches(siid, piid) {
            let code = as_int(value)?;
            let charging =
                ChargingStatus::try_from(code).map_err(|_| DecodeError::UnknownValue {
                    field: "charging_status",
                    value: code.to_string(),
                })?;
            if state.charging_status != Some(charging) {
                state.charging_status = Some(charging);
                pending.push((
                    CHARGING_STATUS_PROPERTY.name.to_string(),
                    json!({"code": code, "state": charging.as_str()}),
                ));
            }
        } else if BLUETOOTH_PROPERTY.matches(siid, piid) {
            let connected = match value {
                Value::Bool(b) => *b,
                other => as_int(other)? != 0,
            };
            if state.bluetooth_connected != Some(connected) {
                state.bluetooth_connected = Some(connected);
                pending.push((BLUETOOTH_PROPERTY.name.to_string(), json!(connected)));
            }
        } else if DEVICE_TELEMETRY_PROPERTY.matches(siid, piid) {
            let before = state.telemetry.temperature();
            state.telemetry.decode(value)?;
            if state.telemetry.temperature() != before {
                pending.push((
                    DEVICE_TELEMETRY_PROPERTY.name.to_string(),
                    json!({"temperature_c": state.telemetry.temperature()}),
                ));
            }
        } else if FIRMWARE_INSTALL_STATE_PROPERTY.matches(siid, piid) {
            let code = as_int(value)?;
            let install =
                FirmwareInstallState::try_from(code).map_err(|_| DecodeError::UnknownValue {
                    field: "firmware_install_state",
                    value: code.to_string(),
                })?;
            if state.firmware_install_state != Some(install) {
                state.firmware_install_state = Some(install);
                info!(code, description = install.description(), "Firmware install state changed");
                pending.push((
                    FIRMWARE_INSTALL_STATE_PROPERTY.name.to_string(),
                    json!({"code": code, "description": install.description()}),
                ));
            }
        } else if FIRMWARE_DOWNLOAD_PROGRESS_PROPERTY.matches(siid, piid) {
            let percent = as_int(value)?;
            if !(0..=100).contains(&percent) {
                return Err(DecodeError::OutOfRange {
                    field: "firmware_download_progress",
                    value: percent,
                });
            }
            if state.firmware_download_progress != Some(percent) {
                state.firmware_download_progress = Some(percent);
                pending
                    .push((FIRMWARE_DOWNLOAD_PROGRESS_PROPERTY.name.to_string(), json!(percent)));
            }
        } else if POSE_COVERAGE_PROPERTY.matches(siid, piid) {
            state.pose.decode(value)?;
            pending.push((
                MOWING_PROGRESS_PROPERTY_NAME.to_string(),
                to_json(&state.pose.progress_data()),
            ));
            pending.push((
                MOWING_COORDINATES_PROPERTY_NAME.to_string(),
                to_json(&state.pose.coordinates_data()),
            ));
        } else if DEVICE_CODE_PROPERTY.matches(siid, piid) {
            if state.device_code.decode(value)? {
                // 基础通知携带原始码，随后按级别进入互斥的严重性通道
                pending.push((DEVICE_CODE_PROPERTY.name.to_string(), value.clone()));
                let channel = state.device_code.notification_channel();
                let payload =
                    state.device_code.current().map(to_json).unwrap_or(Value::Null);
                pending.push((channel.to_string(), payload));
            }
        } else if SCHEDULING_TASK_PROPERTY.matches(siid, piid) {
            state.task.decode(value)?;
            let payload = state.task.task().map(to_json).unwrap_or(Value::Null);
            pending.push((SCHEDULING_TASK_PROPERTY.name.to_string(), payload));
        } else if SCHEDULING_SETTINGS_ECHO_PROPERTY.matches(siid, piid) {
            state.settings_echo.decode(value)?;
            pending.push((SCHEDULING_SETTINGS_ECHO_PROPERTY.name.to_string(), value.clone()));
        } else if SCHEDULING_SUMMARY_PROPERTY.matches(siid, piid) {
            state.summary.decode(value)?;
            pending.push((SCHEDULING_SUMMARY_PROPERTY.name.to_string(), value.clone()));
        } else if MOWER_CONTROL_STATUS_PROPERTY.matches(siid, piid) {
            // 控制码只反映暂停/继续/已停止，不参与任务完成判定：
            // 手动停止也会上报完成码，不能据此钳位进度
            state.control.decode(value)?;
            pending.push((
                MOWER_CONTROL_STATUS_PROPERTY.name.to_string(),
                to_json(&state.control.notification_data()),
            ));
        } else if POWER_STATE_PROPERTY.matches(siid, piid) {
            let code = as_int(value)?;
            // 目前只观测到取值 1（关机中），其它取值众包
            if code != 1 {
                return Err(DecodeError::UnknownValue {
                    field: "power_state",
                    value: code.to_string(),
                });
            }
            state.power_state = Some(code);
            info!("Device is powering off");
            pending.push((POWER_STATE_PROPERTY.name.to_string(), json!(code)));
        } else if SERVICE2_PROPERTY_60.matches(siid, piid) {
            // 含义未知的整数：校验形状后透传，不落状态
            as_int(value)?;
            pending.push((SERVICE2_PROPERTY_60.name.to_string(), value.clone()));
        } else if SERVICE2_PROPERTY_62.matches(siid, piid) {
            as_int(value)?;
            pending.push((SERVICE2_PROPERTY_62.name.to_string(), value.clone()));
        } else if SERVICE2_PROPERTY_63.matches(siid, piid) {
            // 刻意不处理：每次出现都进诊断通道，等待含义被逆向
            return Err(DecodeError::UnknownValue {
                field: SERVICE2_PROPERTY_63.name,
                value: value.to_string(),
            });
        } else if SERVICE2_PROPERTY_64.matches(siid, piid) {
            // 工作统计对象：形状随固件演进，原样透传
            pending.push((SERVICE2_PROPERTY_64.name.to_string(), value.clone()));
        } else if SERVICE2_PROPERTY_65.matches(siid, piid) {
            let nav = value.as_str().ok_or_else(|| DecodeError::UnexpectedType {
                expected: "string",
                actual: value.to_string(),
            })?;
            if nav != TASK_NAV_DOCK {
                return Err(DecodeError::UnknownValue {
                    field: SERVICE2_PROPERTY_65.name,
                    value: nav.to_string(),
                });
            }
            state.task_nav_state = Some(nav.to_string());
            pending.push((SERVICE2_PROPERTY_65.name.to_string(), value.clone()));
        } else if Service5Decoder::handles(siid, piid) {
            if let Some((name, payload)) = state.service5.decode(siid, piid, value)? {
                pending.push((name.to_string(), payload));
            }
        } else if DEVICE_FILE_PATH_PROPERTY.matches(siid, piid) {
            let path = value.as_str().ok_or_else(|| DecodeError::UnexpectedType {
                expected: "string",
                actual: value.to_string(),
            })?;
            state.device_file_path = Some(path.to_string());
            pending.push((DEVICE_FILE_PATH_PROPERTY.name.to_string(), value.clone()));
        } else {
            return Err(DecodeError::UnknownValue {
                field: "property",
                value: format!("{siid}:{piid}"),
            });
        }

        Ok(())
    }

    /// 分发一条事件（锁内调用），返回是否被识别
    fn dispatch_event(
        &self,
        state: &mut DeviceState,
        siid: i32,
        eiid: i32,
        arguments: &[EventArgument],
        pending: &mut Vec<(String, Value)>,
    ) -> bool {
        let args_json: Vec<Value> = arguments
            .iter()
            .map(|arg| json!({"piid": arg.piid, "value": arg.value}))
            .collect();

        if MISSION_COMPLETION_EVENT.matches(siid, eiid) {
            info!("Mission completion event received");
            state.pose.mark_mission_completed();
            self.completion.set();
            pending.push((MISSION_COMPLETION_EVENT.name.to_string(), json!(args_json)));
            pending.push((
                MOWING_PROGRESS_PROPERTY_NAME.to_string(),
                to_json(&state.pose.progress_data()),
            ));
            true
        } else if FIRMWARE_VALIDATION_EVENT.matches(siid, eiid) {
            info!("Firmware validation event received");
            pending.push((FIRMWARE_VALIDATION_EVENT.name.to_string(), json!(args_json)));
            true
        } else {
            false
        }
    }

    /// 锁外触发累积的通知
    fn fire(&self, pending: Vec<(String, Value)>) {
        for (name, value) in pending {
            self.observers.notify(&name, &value);
        }
    }

    // ==================== REST 拉取 ====================

    /// 从云端拉取设备信息并合并进状态
    ///
    /// MQTT 推送在部分固件上并不可靠，周期性拉取作为补充。
    /// 拉取结果与推送共用同一把锁，合并语义与 2:1/3:1 推送一致。
    pub fn refresh_device_info(&self) -> Result<(), DeviceError> {
        let info = self.transport.fetch_device_info()?;
        let mut pending: Vec<(String, Value)> = Vec::new();

        {
            let mut state = self.inner.lock();

            if let Some(battery) = info.battery {
                if state.battery_percent != Some(battery) {
                    state.battery_percent = Some(battery);
                    pending.push((BATTERY_PROPERTY.name.to_string(), json!(battery)));
                }
            }
            if let Some(code) = info.latest_status {
                if state.status_code != Some(code) {
                    if code == STATUS_CODE_MOWING {
                        state.pose.reset_mission_completion();
                    }
                    state.status_code = Some(code);
                    pending.push((STATUS_PROPERTY.name.to_string(), json_status_payload(code)));
                }
            }
            if let Some(model) = info.model {
                state.device_code.set_model(model.clone());
                state.model = Some(model);
            }
            if let Some(version) = info.firmware_version {
                if state.firmware_version.as_deref() != Some(version.as_str()) {
                    pending.push((FIRMWARE_VERSION_PROPERTY_NAME.to_string(), json!(version)));
                    state.firmware_version = Some(version);
                }
            }
            if let Some(serial) = info.serial_number {
                state.serial_number = Some(serial);
            }

            self.snapshot.store(Arc::new(state.snapshot()));
        }

        self.fire(pending);
        Ok(())
    }

    // ==================== 命令序列 ====================

    /// 开始割草
    ///
    /// 动作确认后重置任务完成标志并清除完成信号，
    /// 新任务的进度从实际覆盖率重新计算。
    pub fn start_mowing(&self) -> Result<(), DeviceError> {
        self.transport.execute_action(&ACTION_START_MOWING)?;
        info!("Start mowing command accepted");

        {
            let mut state = self.inner.lock();
            state.pose.reset_mission_completion();
            self.snapshot.store(Arc::new(state.snapshot()));
        }
        self.completion.clear();

        self.observers.notify(ACTIVITY_PROPERTY_NAME, &json!("mowing"));
        Ok(())
    }

    /// 暂停割草
    pub fn pause(&self) -> Result<(), DeviceError> {
        self.transport.execute_action(&ACTION_PAUSE)?;
        info!("Pause command accepted");
        self.observers.notify(ACTIVITY_PROPERTY_NAME, &json!("paused"));
        Ok(())
    }

    /// 归航序列：停止 → 等待完成信号 → 返回充电桩
    ///
    /// 直接发 DOCK 会被割草中的设备拒绝，必须先 STOP。
    /// STOP 失败立即中止（不等待、不发 DOCK）；等待超时只告警不中止，
    /// 设备侧多数情况下已经停稳，继续发 DOCK 是安全的。
    pub fn return_to_dock(&self) -> Result<(), DeviceError> {
        self.completion.clear();

        self.transport.execute_action(&ACTION_STOP)?;
        info!("Stop command accepted, waiting for mission completion signal");
        self.observers.notify(ACTIVITY_PROPERTY_NAME, &json!("stopping"));

        if !self.completion.wait_timeout(self.config.dock_wait_timeout) {
            warn!(
                timeout_secs = self.config.dock_wait_timeout.as_secs(),
                "Mission completion signal not received in time, docking anyway"
            );
        }

        self.transport.execute_action(&ACTION_DOCK)?;
        info!("Dock command accepted");

        let progress;
        {
            let mut state = self.inner.lock();
            state.pose.mark_mission_completed();
            progress = to_json(&state.pose.progress_data());
            self.snapshot.store(Arc::new(state.snapshot()));
        }

        self.observers.notify(ACTIVITY_PROPERTY_NAME, &json!("docked"));
        self.observers.notify(MOWING_PROGRESS_PROPERTY_NAME, &progress);
        Ok(())
    }
}

fn as_int(value: &Value) -> Result<i64, DecodeError> {
    value.as_i64().ok_or_else(|| DecodeError::UnexpectedType {
        expected: "integer",
        actual: value.to_string(),
    })
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
