//! 任务完成信号
//!
//! 归航序列需要等待「任务完成」控制码（2:56 code 2）到达。
//! 消息分发线程置位，序列线程带超时等待；二者之间只共享
//! 这个二值信号，不共享解码器状态。

use parking_lot::{Condvar, Mutex};
use std::time::Duration;

/// 二值完成信号（置位 / 清除 / 带超时等待）
#[derive(Default)]
pub struct CompletionSignal {
    flag: Mutex<bool>,
    condvar: Condvar,
}

impl CompletionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// 置位并唤醒所有等待者
    pub fn set(&self) {
        let mut flag = self.flag.lock();
        *flag = true;
        self.condvar.notify_all();
    }

    /// 清除信号（序列开始前调用，丢弃过期的完成通知）
    pub fn clear(&self) {
        *self.flag.lock() = false;
    }

    /// 当前是否已置位
    pub fn is_set(&self) -> bool {
        *self.flag.lock()
    }

    /// 等待置位，最多等待 `timeout`
    ///
    /// 返回 `true` 表示信号已置位，`false` 表示超时。
    /// 已置位时立即返回，不消耗信号。
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut flag = self.flag.lock();
        if *flag {
            return true;
        }
        let _ = self.condvar.wait_while_for(&mut flag, |set| !*set, timeout);
        *flag
    }
}
