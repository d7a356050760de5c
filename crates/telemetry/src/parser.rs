use crate::literal::{parse_float_prefix, parse_int_prefix, quoted_prefix};
use crate::snapshot::{BATTERY_STATUS_CAPACITY, TEXT_CAPACITY};
use crate::update::TelemetryUpdate;
use tracing::trace;

/// First byte of every status report.
pub const STATUS_SENTINEL: u8 = b'{';

/// The host reports a load score; dividing by this yields watts.
const POWER_SCORE_DIVISOR: f32 = 100_000.0;

/// One recognized key: the exact text that precedes its literal, and how the
/// literal after it is stored in an update.
struct FieldRule {
    pattern: &'static str,
    extract: fn(&[u8], &mut TelemetryUpdate),
}

/// Evaluated independently, so key order in the message is irrelevant and a
/// missing key leaves its field `None`.
static FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        pattern: r#""cpu_usage":"#,
        extract: |rest, update| update.cpu_usage = Some(parse_float_prefix(rest)),
    },
    FieldRule {
        pattern: r#""cpu_temp":"#,
        extract: |rest, update| update.cpu_temp = Some(parse_float_prefix(rest)),
    },
    FieldRule {
        pattern: r#""gpu_temp":"#,
        extract: |rest, update| update.gpu_temp = Some(parse_float_prefix(rest)),
    },
    FieldRule {
        pattern: r#""memory_usage":"#,
        extract: |rest, update| update.memory_usage = Some(parse_float_prefix(rest)),
    },
    FieldRule {
        pattern: r#""memory_total":"#,
        extract: |rest, update| update.memory_total_mb = Some(parse_int_prefix(rest)),
    },
    FieldRule {
        pattern: r#""memory_used":"#,
        extract: |rest, update| update.memory_used_mb = Some(parse_int_prefix(rest)),
    },
    FieldRule {
        pattern: r#""swap_usage":"#,
        extract: |rest, update| update.swap_usage = Some(parse_float_prefix(rest)),
    },
    FieldRule {
        pattern: r#""power_score":"#,
        extract: |rest, update| {
            update.power_watts = Some(parse_float_prefix(rest) / POWER_SCORE_DIVISOR)
        },
    },
    // only the first fan is shown
    FieldRule {
        pattern: r#""fan_speeds":["#,
        extract: |rest, update| update.fan_rpm = Some(saturate_i32(parse_int_prefix(rest))),
    },
    FieldRule {
        pattern: r#""cpu_frequency_mhz":"#,
        extract: |rest, update| update.cpu_freq_mhz = Some(saturate_i32(parse_int_prefix(rest))),
    },
    FieldRule {
        pattern: r#""hostname":""#,
        extract: |rest, update| update.hostname = Some(quoted_prefix(rest, TEXT_CAPACITY)),
    },
    FieldRule {
        pattern: r#""os_name":""#,
        extract: |rest, update| update.os_name = Some(quoted_prefix(rest, TEXT_CAPACITY)),
    },
    FieldRule {
        pattern: r#""cpu_model":""#,
        extract: |rest, update| update.cpu_model = Some(quoted_prefix(rest, TEXT_CAPACITY)),
    },
    FieldRule {
        pattern: r#""battery_status":""#,
        extract: |rest, update| {
            update.battery_status = Some(quoted_prefix(rest, BATTERY_STATUS_CAPACITY))
        },
    },
    FieldRule {
        pattern: r#""cpu_cores":"#,
        extract: |rest, update| update.cpu_cores = Some(saturate_i32(parse_int_prefix(rest))),
    },
    FieldRule {
        pattern: r#""battery_percentage":"#,
        extract: |rest, update| update.battery_level = Some(saturate_i32(parse_int_prefix(rest))),
    },
    FieldRule {
        pattern: r#""uptime_secs":"#,
        extract: |rest, update| update.uptime_seconds = Some(parse_int_prefix(rest)),
    },
];

/// Whether a payload looks like a status report.
pub fn is_status(payload: &[u8]) -> bool {
    payload.first() == Some(&STATUS_SENTINEL)
}

/// Extract every recognized key from a status report.
///
/// The payload ends at its first NUL byte. Each key is located by its first
/// occurrence; unparseable numbers become zero and oversized strings are
/// truncated. The caller is expected to have checked [`is_status`].
pub fn parse_status(payload: &[u8]) -> TelemetryUpdate {
    let text = match payload.iter().position(|&b| b == 0) {
        Some(end) => &payload[..end],
        None => payload,
    };

    let mut update = TelemetryUpdate::default();
    for rule in FIELD_RULES {
        if let Some(rest) = after_first(text, rule.pattern.as_bytes()) {
            (rule.extract)(rest, &mut update);
        }
    }
    trace!(fields = update.len(), bytes = text.len(), "status parsed");
    update
}

fn after_first<'a>(haystack: &'a [u8], needle: &[u8]) -> Option<&'a [u8]> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|start| &haystack[start + needle.len()..])
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
