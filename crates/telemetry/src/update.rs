/// Partial status extracted from one message. `None` means the message did
/// not carry that key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryUpdate {
    pub cpu_usage: Option<f32>,
    pub memory_usage: Option<f32>,
    pub swap_usage: Option<f32>,
    pub cpu_temp: Option<f32>,
    pub gpu_temp: Option<f32>,
    pub power_watts: Option<f32>,
    pub cpu_freq_mhz: Option<i32>,
    pub fan_rpm: Option<i32>,
    pub uptime_seconds: Option<i64>,
    pub hostname: Option<String>,
    pub os_name: Option<String>,
    pub cpu_model: Option<String>,
    pub cpu_cores: Option<i32>,
    pub battery_level: Option<i32>,
    pub battery_status: Option<String>,
    pub memory_total_mb: Option<i64>,
    pub memory_used_mb: Option<i64>,
}

impl TelemetryUpdate {
    /// Number of fields this update carries.
    pub fn len(&self) -> usize {
        let numeric = [
            self.cpu_usage.is_some(),
            self.memory_usage.is_some(),
            self.swap_usage.is_some(),
            self.cpu_temp.is_some(),
            self.gpu_temp.is_some(),
            self.power_watts.is_some(),
            self.cpu_freq_mhz.is_some(),
            self.fan_rpm.is_some(),
            self.uptime_seconds.is_some(),
            self.cpu_cores.is_some(),
            self.battery_level.is_some(),
            self.memory_total_mb.is_some(),
            self.memory_used_mb.is_some(),
        ];
        let text = [
            self.hostname.is_some(),
            self.os_name.is_some(),
            self.cpu_model.is_some(),
            self.battery_status.is_some(),
        ];
        numeric.iter().chain(text.iter()).filter(|present| **present).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
