use crate::traits::TrustMe;

pub trait Clock: Send + Sync {
    fn now_sec_u64(&self) -> u64;
}

pub struct SimpleClock;

impl Clock for SimpleClock {
    #[inline]
    fn now_sec_u64(&self) -> u64 {
        now_sec_u64()
    }
}

/// Clock frozen at the specified unix time
#[derive(Debug, Default, Copy, Clone)]
pub struct ConstClock {
    pub time_sec: u64,
}

impl ConstClock {
    pub const fn from_secs(time_sec: u64) -> Self {
        Self { time_sec }
    }
}

impl Clock for ConstClock {
    #[inline]
    fn now_sec_u64(&self) -> u64 {
        self.time_sec
    }
}

pub fn now_sec_u64() -> u64 {
    use std::time::SystemTime;

    (SystemTime::now().duration_since(SystemTime::UNIX_EPOCH))
        .trust_me()
        .as_secs()
}
