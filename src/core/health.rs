use std::fs;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HealthReport {
    /// 1, 5 and 15 minute load averages, when the platform reports them.
    pub load: Option<[f64; 3]>,
    pub uptime: Option<Duration>,
    pub cpus: Option<usize>,
}

/// Source of the host status shown by `sysCheck`.
pub trait HealthReporter {
    fn report(&self) -> HealthReport;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHealth;

impl SystemHealth {
    pub fn new() -> Self {
        Self
    }

    fn load_average() -> Option<[f64; 3]> {
        let mut load = [0.0f64; 3];
        // SAFETY: the buffer holds exactly the three samples requested.
        let filled = unsafe { libc::getloadavg(load.as_mut_ptr(), 3) };
        (filled == 3).then_some(load)
    }

    fn uptime() -> Option<Duration> {
        let raw = fs::read_to_string("/proc/uptime").ok()?;
        let secs: f64 = raw.split_whitespace().next()?.parse().ok()?;
        Some(Duration::from_secs_f64(secs))
    }

    fn cpus() -> Option<usize> {
        // SAFETY: sysconf has no preconditions.
        let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        usize::try_from(n).ok().filter(|&n| n > 0)
    }
}

impl HealthReporter for SystemHealth {
    fn report(&self) -> HealthReport {
        HealthReport {
            load: Self::load_average(),
            uptime: Self::uptime(),
            cpus: Self::cpus(),
        }
    }
}

pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if days > 0 {
        format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}
