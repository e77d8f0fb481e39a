//! 属性/事件/动作标识常量定义
//!
//! 云端协议用三段式寻址：siid（服务实例）/ piid（属性实例）/
//! eiid（事件实例）/ aiid（动作实例）。本模块是一张平面常量表，
//! 匹配即 (siid, piid) 精确相等，`name` 作为通知键保持稳定。

/// 属性标识（siid + piid + 稳定通知名）
///
/// 进程启动时作为常量构建一次，永不变更。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyId {
    pub siid: i32,
    pub piid: i32,
    pub name: &'static str,
}

impl PropertyId {
    pub const fn new(siid: i32, piid: i32, name: &'static str) -> Self {
        Self { siid, piid, name }
    }

    /// 精确匹配 (siid, piid)，`name` 不参与比较
    pub fn matches(&self, siid: i32, piid: i32) -> bool {
        self.siid == siid && self.piid == piid
    }
}

/// 事件标识（siid + eiid）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId {
    pub siid: i32,
    pub eiid: i32,
    pub name: &'static str,
}

impl EventId {
    pub const fn new(siid: i32, eiid: i32, name: &'static str) -> Self {
        Self { siid, eiid, name }
    }

    pub fn matches(&self, siid: i32, eiid: i32) -> bool {
        self.siid == siid && self.eiid == eiid
    }
}

/// 动作标识（siid + aiid）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId {
    pub siid: i32,
    pub aiid: i32,
    pub name: &'static str,
}

impl ActionId {
    pub const fn new(siid: i32, aiid: i32, name: &'static str) -> Self {
        Self { siid, aiid, name }
    }
}

// ==================== Service 1：固件 / 位姿遥测 ====================

/// 复合遥测属性（1:1），携带温度等实时数据
pub const DEVICE_TELEMETRY_PROPERTY: PropertyId = PropertyId::new(1, 1, "device_telemetry");
/// 固件安装状态（1:2）：2 = 有新固件，3 = 下载后安装中
pub const FIRMWARE_INSTALL_STATE_PROPERTY: PropertyId =
    PropertyId::new(1, 2, "firmware_install_state");
/// 固件下载进度（1:3），百分比 0-100
pub const FIRMWARE_DOWNLOAD_PROGRESS_PROPERTY: PropertyId =
    PropertyId::new(1, 3, "firmware_download_progress");
/// 位姿与覆盖率二进制遥测（1:4）
pub const POSE_COVERAGE_PROPERTY: PropertyId = PropertyId::new(1, 4, "pose_coverage");
/// 会话开始指示（1:50），仅凭出现即生效，通常无 value 字段
pub const SERVICE1_PROPERTY_50: PropertyId = PropertyId::new(1, 50, "service1_property_50");
/// 会话开始指示（1:51），同上
pub const SERVICE1_PROPERTY_51: PropertyId = PropertyId::new(1, 51, "service1_property_51");
/// 任务完成后出现的标志（1:52）
pub const SERVICE1_COMPLETION_FLAG_PROPERTY: PropertyId =
    PropertyId::new(1, 52, "service1_completion_flag");

// ==================== Service 2：割草状态 / 调度 ====================

/// 设备状态码（2:1），状态 1 = 割草中
pub const STATUS_PROPERTY: PropertyId = PropertyId::new(2, 1, "status");
/// 设备代码（2:2），按机型表解析为错误/警告/信息
pub const DEVICE_CODE_PROPERTY: PropertyId = PropertyId::new(2, 2, "device_code");
/// 任务描述（2:50）
pub const SCHEDULING_TASK_PROPERTY: PropertyId = PropertyId::new(2, 50, "scheduling_task");
/// 设置变更回显（2:51），任何设置变化时回报
pub const SCHEDULING_SETTINGS_ECHO_PROPERTY: PropertyId =
    PropertyId::new(2, 51, "scheduling_settings_echo");
/// 任务完成摘要（2:52），目前总是空对象
pub const SCHEDULING_SUMMARY_PROPERTY: PropertyId =
    PropertyId::new(2, 52, "scheduling_summary");
/// 割草控制状态（2:56）：暂停/继续/完成
pub const MOWER_CONTROL_STATUS_PROPERTY: PropertyId =
    PropertyId::new(2, 56, "mower_control_status");
/// 电源状态（2:57），关机时出现，目前只接受取值 1
pub const POWER_STATE_PROPERTY: PropertyId = PropertyId::new(2, 57, "power_state");
/// Service 2 属性 60（2:60），简单整数，含义未知
pub const SERVICE2_PROPERTY_60: PropertyId = PropertyId::new(2, 60, "service2_property_60");
/// Service 2 属性 62（2:62），简单整数，含义未知
pub const SERVICE2_PROPERTY_62: PropertyId = PropertyId::new(2, 62, "service2_property_62");
/// Service 2 属性 63（2:63），固件下载失败时观测到 -33001，
/// 含义未知，刻意按解码失败处理以便众包
pub const SERVICE2_PROPERTY_63: PropertyId = PropertyId::new(2, 63, "service2_property_63");
/// Service 2 属性 64（2:64），工作统计（周统计、位置、工作区间等）
pub const SERVICE2_PROPERTY_64: PropertyId = PropertyId::new(2, 64, "service2_property_64");
/// Service 2 属性 65（2:65），任务导航状态字符串
pub const SERVICE2_PROPERTY_65: PropertyId = PropertyId::new(2, 65, "service2_property_65");

// ==================== Service 3 / 4：电池 / 连接 ====================

/// 电池百分比（3:1）
pub const BATTERY_PROPERTY: PropertyId = PropertyId::new(3, 1, "battery_percent");
/// 充电状态枚举（3:2）
pub const CHARGING_STATUS_PROPERTY: PropertyId = PropertyId::new(3, 2, "charging_status");
/// 蓝牙连接状态（4:2）
pub const BLUETOOTH_PROPERTY: PropertyId = PropertyId::new(4, 2, "bluetooth_connected");

// ==================== Service 5：电源遥测 ====================

/// 任务状态（5:104）
pub const TASK_STATUS_PROPERTY: PropertyId = PropertyId::new(5, 104, "task_status");
/// Service 5 属性 105（5:105），含义未知的整数
pub const SERVICE5_PROPERTY_105: PropertyId = PropertyId::new(5, 105, "service5_property_105");
/// BMS 微相位代码（5:106）
pub const BMS_PHASE_PROPERTY: PropertyId = PropertyId::new(5, 106, "bms_phase");
/// 能量/放电指数（5:107）
pub const SERVICE5_ENERGY_INDEX_PROPERTY: PropertyId = PropertyId::new(5, 107, "energy_index");
/// Service 5 属性 108（5:108），含义未知的整数
pub const SERVICE5_PROPERTY_108: PropertyId = PropertyId::new(5, 108, "service5_property_108");

// ==================== Service 99：文件路径 ====================

/// 设备文件路径（99:10）：固件包或日志文件的云端路径
pub const DEVICE_FILE_PATH_PROPERTY: PropertyId = PropertyId::new(99, 10, "device_file_path");

// ==================== 事件 ====================

/// 固件校验事件（1:1）
pub const FIRMWARE_VALIDATION_EVENT: EventId = EventId::new(1, 1, "firmware_validation");
/// 任务完成事件（4:1），stop-then-dock 序列的确认信号
pub const MISSION_COMPLETION_EVENT: EventId = EventId::new(4, 1, "mission_completion_event");

// ==================== 动作 ====================

/// 开始割草
pub const ACTION_START_MOWING: ActionId = ActionId::new(2, 1, "start_mowing");
/// 暂停
pub const ACTION_PAUSE: ActionId = ActionId::new(2, 2, "pause");
/// 停止（dock 序列第一步）
pub const ACTION_STOP: ActionId = ActionId::new(2, 3, "stop");
/// 返回充电桩（dock 序列第二步）
pub const ACTION_DOCK: ActionId = ActionId::new(3, 1, "dock");
