use crate::update::TelemetryUpdate;

/// Capacity of the host identity text fields (hostname, OS, CPU model).
pub const TEXT_CAPACITY: usize = 64;

/// Capacity of the battery status text field.
pub const BATTERY_STATUS_CAPACITY: usize = 32;

/// Latest known status of the remote host.
///
/// Every field starts at a compiled-in default and is only ever replaced by
/// a value extracted from a real status report.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    pub cpu_usage: f32,
    pub memory_usage: f32,
    pub swap_usage: f32,
    pub cpu_temp: f32,
    pub gpu_temp: f32,
    pub power_watts: f32,
    pub cpu_freq_mhz: i32,
    pub fan_rpm: i32,
    pub uptime_seconds: i64,
    pub hostname: String,
    pub os_name: String,
    pub cpu_model: String,
    pub cpu_cores: i32,
    /// Charge in percent, `-1` while unknown.
    pub battery_level: i32,
    pub battery_status: String,
    pub memory_total_mb: i64,
    pub memory_used_mb: i64,
    pub connected: bool,
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self {
            cpu_usage: 25.0,
            memory_usage: 45.0,
            swap_usage: 10.0,
            cpu_temp: 42.0,
            gpu_temp: 48.0,
            power_watts: 15.0,
            cpu_freq_mhz: 2400,
            fan_rpm: 1200,
            uptime_seconds: 0,
            hostname: "CONNECTING...".into(),
            os_name: "UNKNOWN".into(),
            cpu_model: "GENERIC CPU".into(),
            cpu_cores: 8,
            battery_level: -1,
            battery_status: "UNKNOWN".into(),
            memory_total_mb: 16384,
            memory_used_mb: 8192,
            connected: false,
        }
    }
}

impl TelemetrySnapshot {
    /// Overwrite every field the update carries; leave the rest alone.
    pub fn apply(&mut self, update: &TelemetryUpdate) {
        fn set<T: Clone>(field: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }

        set(&mut self.cpu_usage, &update.cpu_usage);
        set(&mut self.memory_usage, &update.memory_usage);
        set(&mut self.swap_usage, &update.swap_usage);
        set(&mut self.cpu_temp, &update.cpu_temp);
        set(&mut self.gpu_temp, &update.gpu_temp);
        set(&mut self.power_watts, &update.power_watts);
        set(&mut self.cpu_freq_mhz, &update.cpu_freq_mhz);
        set(&mut self.fan_rpm, &update.fan_rpm);
        set(&mut self.uptime_seconds, &update.uptime_seconds);
        set(&mut self.hostname, &update.hostname);
        set(&mut self.os_name, &update.os_name);
        set(&mut self.cpu_model, &update.cpu_model);
        set(&mut self.cpu_cores, &update.cpu_cores);
        set(&mut self.battery_level, &update.battery_level);
        set(&mut self.battery_status, &update.battery_status);
        set(&mut self.memory_total_mb, &update.memory_total_mb);
        set(&mut self.memory_used_mb, &update.memory_used_mb);
    }
}
