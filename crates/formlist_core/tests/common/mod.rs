use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock that advances one second per reading, starting at `start_secs`.
pub struct StepClock {
    next_secs: AtomicI64,
}

impl StepClock {
    pub fn starting_at(start_secs: i64) -> Self {
        Self {
            next_secs: AtomicI64::new(start_secs),
        }
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let secs = self.next_secs.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(secs, 0).unwrap()
    }
}

pub fn accept(_prompt: &str) -> bool {
    true
}

pub fn decline(_prompt: &str) -> bool {
    false
}
