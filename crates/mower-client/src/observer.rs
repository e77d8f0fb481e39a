//! 属性变更通知扇出
//!
//! 显式的观察者注册表：注册返回句柄供注销；回调在消息处理过程中
//! 同步、按注册顺序触发；单个回调 panic 被隔离记录，
//! 不影响其余订阅者，也不中断消息分发。

use parking_lot::Mutex;
use serde_json::Value;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::error;

/// 属性变更回调：`(通知名, 通知值)`
pub type PropertyCallback = Arc<dyn Fn(&str, &Value) + Send + Sync>;

/// 注册句柄，用于注销
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackHandle(u64);

/// 观察者注册表
///
/// 锁只保护注册表本身；触发时先拷出回调列表再调用，
/// 回调内部可以安全地再注册/注销。
#[derive(Default)]
pub struct ObserverRegistry {
    callbacks: Mutex<Vec<(u64, PropertyCallback)>>,
    next_id: AtomicU64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个属性变更回调
    pub fn register(&self, callback: PropertyCallback) -> CallbackHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.callbacks.lock().push((id, callback));
        CallbackHandle(id)
    }

    /// 注销回调；句柄未注册时为空操作
    pub fn unregister(&self, handle: CallbackHandle) {
        self.callbacks.lock().retain(|(id, _)| *id != handle.0);
    }

    /// 按注册顺序触发全部回调，隔离单个回调的失败
    pub fn notify(&self, name: &str, value: &Value) {
        let callbacks: Vec<PropertyCallback> =
            self.callbacks.lock().iter().map(|(_, cb)| cb.clone()).collect();

        for callback in callbacks {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| callback(name, value))) {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(property = name, %reason, "Property callback panicked");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex as StdMutex;

    #[test]
    fn test_notify_in_registration_order() {
        let registry = ObserverRegistry::new();
        let seen = Arc::new(StdMutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = seen.clone();
            registry.register(Arc::new(move |name: &str, _: &Value| {
                seen.lock().unwrap().push(format!("{tag}:{name}"));
            }));
        }

        registry.notify("battery_percent", &json!(75));
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["first:battery_percent", "second:battery_percent", "third:battery_percent"]
        );
    }

    #[test]
    fn test_panicking_callback_is_isolated() {
        let registry = ObserverRegistry::new();
        let seen = Arc::new(StdMutex::new(Vec::new()));

        registry.register(Arc::new(|_: &str, _: &Value| panic!("subscriber bug")));
        {
            let seen = seen.clone();
            registry.register(Arc::new(move |name: &str, _: &Value| {
                seen.lock().unwrap().push(name.to_string());
            }));
        }

        registry.notify("status", &json!(1));
        // 后续订阅者照常收到通知
        assert_eq!(*seen.lock().unwrap(), vec!["status"]);
    }

    #[test]
    fn test_unregister() {
        let registry = ObserverRegistry::new();
        let seen = Arc::new(StdMutex::new(0u32));

        let handle = {
            let seen = seen.clone();
            registry.register(Arc::new(move |_: &str, _: &Value| {
                *seen.lock().unwrap() += 1;
            }))
        };

        registry.notify("x", &json!(1));
        registry.unregister(handle);
        registry.notify("x", &json!(2));

        assert_eq!(*seen.lock().unwrap(), 1);
        assert!(registry.is_empty());

        // 重复注销是空操作
        registry.unregister(handle);
    }

    #[test]
    fn test_callback_may_register_another() {
        let registry = Arc::new(ObserverRegistry::new());
        let registry2 = registry.clone();

        registry.register(Arc::new(move |_: &str, _: &Value| {
            registry2.register(Arc::new(|_: &str, _: &Value| {}));
        }));

        registry.notify("x", &json!(null));
        assert_eq!(registry.len(), 2);
    }
}
