//! # Mower Client
//!
//! 割草机设备状态聚合与命令序列
//!
//! 在 [`mower-protocol`](mower_protocol) 解码层之上提供单台设备的
//! 聚合视图：MQTT 推送与 REST 拉取汇聚到同一套状态，属性变更通过
//! 观察者回调扇出，归航等多步命令序列由本 crate 驱动。
//!
//! ## 模块
//!
//! - `device`: 设备状态聚合与消息分发（[`MowerDevice`]）
//! - `transport`: 传输层接缝（[`CloudTransport`] trait）
//! - `observer`: 属性变更通知扇出
//! - `signal`: 任务完成信号（归航序列的等待原语）
//! - `config`: 设备聚合配置
//! - `error`: 客户端层错误类型定义
//!
//! ## 用法
//!
//! ```no_run
//! use std::sync::Arc;
//! use mower_client::{CloudTransport, DeviceConfig, MowerDevice};
//! # fn make_transport() -> Arc<dyn CloudTransport> { unimplemented!() }
//!
//! let transport = make_transport();
//! let device = MowerDevice::new(transport, DeviceConfig::default());
//!
//! device.register_callback(Arc::new(|name, value| {
//!     println!("{name} = {value}");
//! }));
//!
//! // 传输层每收到一条 MQTT 消息就调用一次
//! device.handle_message(serde_json::json!({
//!     "method": "properties_changed",
//!     "params": [{"siid": 3, "piid": 1, "value": 75}]
//! }));
//!
//! assert_eq!(device.snapshot().battery_percent, Some(75));
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod observer;
pub mod signal;
pub mod transport;

pub use config::{DEFAULT_DOCK_WAIT_TIMEOUT, DeviceConfig};
pub use device::{
    ACTIVITY_PROPERTY_NAME, DeviceSnapshot, FIRMWARE_VERSION_PROPERTY_NAME,
    MOWING_COORDINATES_PROPERTY_NAME, MOWING_PROGRESS_PROPERTY_NAME, MowerDevice,
    OTA_STATE_PROPERTY_NAME, UNHANDLED_MQTT_PROPERTY_NAME,
};
pub use error::{DeviceError, TransportError};
pub use observer::{CallbackHandle, ObserverRegistry, PropertyCallback};
pub use signal::CompletionSignal;
pub use transport::{CloudTransport, DeviceInfo};
