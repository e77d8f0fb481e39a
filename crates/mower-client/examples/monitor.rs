//! 设备监控示例
//!
//! 用内存传输模拟一台割草机的推送流，演示状态聚合、
//! 属性变更订阅与归航序列。
//!
//! ```bash
//! cargo run --example monitor
//! ```

use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use mower_client::{CloudTransport, DeviceConfig, DeviceInfo, MowerDevice, TransportError};
use mower_protocol::{ActionId, SENTINEL_BYTE};

/// 永远成功的演示传输
struct DemoTransport;

impl CloudTransport for DemoTransport {
    fn execute_action(&self, action: &ActionId) -> Result<(), TransportError> {
        println!(">> action sent: {}", action.name);
        Ok(())
    }

    fn fetch_device_info(&self) -> Result<DeviceInfo, TransportError> {
        serde_json::from_value(json!({
            "battery": 90,
            "latestStatus": 5,
            "ver": "1.5.0_demo",
            "sn": "DEMO123456",
            "model": "mower.demo.p2255",
        }))
        .map_err(|e| TransportError::Failed(e.to_string()))
    }
}

/// 构造一帧 1:4 完整格式载荷
fn pose_frame(x: i16, y: i16, total_centisqm: u16, current_centisqm: u16) -> Value {
    let mut payload = vec![0u8; 31];
    payload[0..2].copy_from_slice(&x.to_le_bytes());
    payload[2..4].copy_from_slice(&y.to_le_bytes());
    payload[25..27].copy_from_slice(&total_centisqm.to_le_bytes());
    payload[28..30].copy_from_slice(&current_centisqm.to_le_bytes());

    let mut frame = vec![SENTINEL_BYTE];
    frame.extend_from_slice(&payload);
    frame.push(SENTINEL_BYTE);
    json!(frame)
}

fn main() {
    // 初始化日志
    tracing_subscriber::fmt().init();

    let config = DeviceConfig::new().with_dock_wait_timeout(Duration::from_secs(2));
    let device = Arc::new(MowerDevice::new(Arc::new(DemoTransport), config));

    device.register_callback(Arc::new(|name: &str, value: &Value| {
        println!("<< {name} = {value}");
    }));

    // 连接后先拉一次设备信息
    device.refresh_device_info().expect("demo transport never fails");

    // 模拟一段 MQTT 推送流
    device.handle_message(json!({
        "method": "properties_changed",
        "params": [{"siid": 3, "piid": 1, "value": 75}]
    }));
    device.handle_message(json!({
        "method": "properties_changed",
        "params": [{"siid": 2, "piid": 1, "value": 1}]
    }));
    device.handle_message(json!({
        "method": "properties_changed",
        "params": [{"siid": 1, "piid": 4, "value": pose_frame(120, -40, 10000, 9600)}]
    }));

    let snapshot = device.snapshot();
    println!(
        "battery={:?} status={:?} progress={:?}%",
        snapshot.battery_percent, snapshot.status_name, snapshot.progress.progress_percent
    );

    // 归航：后台线程模拟设备在 STOP 之后上报任务完成事件
    let pusher = {
        let device = device.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(300));
            device.handle_message(json!({
                "method": "event_occured",
                "params": {"siid": 4, "eiid": 1}
            }));
        })
    };

    device.return_to_dock().expect("demo transport never fails");
    pusher.join().expect("pusher thread panicked");

    let snapshot = device.snapshot();
    println!(
        "mission_completed={} progress={:?}%",
        snapshot.mission_completed, snapshot.progress.progress_percent
    );
}
