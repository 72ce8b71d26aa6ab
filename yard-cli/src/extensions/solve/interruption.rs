//! Interruption handler.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/solve/interruption_test.rs"]
mod interruption_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use yard_core::utils::{Float, Quota, TimeQuota};

/// Creates interruption quota: it is reached on Ctrl-C or when the optional time limit is exceeded.
pub fn create_interruption_quota(max_time: Option<Float>) -> Arc<dyn Quota + Send + Sync> {
    let inner = max_time.map::<Arc<dyn Quota + Send + Sync>, _>(|time| Arc::new(TimeQuota::new(time)));

    Arc::new(InterruptionQuota { inner, should_interrupt: get_interruption_flag() })
}

/// Installs the signal handler once per process and returns a flag it raises.
fn get_interruption_flag() -> Arc<AtomicBool> {
    static SHOULD_INTERRUPT: OnceLock<Arc<AtomicBool>> = OnceLock::new();

    SHOULD_INTERRUPT
        .get_or_init(|| {
            let should_interrupt = Arc::new(AtomicBool::new(false));

            if let Err(err) = ctrlc::set_handler({
                let should_interrupt = should_interrupt.clone();
                move || {
                    should_interrupt.store(true, Ordering::Relaxed);
                }
            }) {
                eprintln!("cannot set interruption handler: '{err}'");
            }

            should_interrupt
        })
        .clone()
}

struct InterruptionQuota {
    inner: Option<Arc<dyn Quota + Send + Sync>>,
    should_interrupt: Arc<AtomicBool>,
}

impl Quota for InterruptionQuota {
    fn is_reached(&self) -> bool {
        self.inner.as_ref().is_some_and(|inner| inner.is_reached()) || self.should_interrupt.load(Ordering::Relaxed)
    }

    fn remaining(&self) -> Option<Duration> {
        if self.should_interrupt.load(Ordering::Relaxed) {
            Some(Duration::ZERO)
        } else {
            self.inner.as_ref().and_then(|inner| inner.remaining())
        }
    }
}
