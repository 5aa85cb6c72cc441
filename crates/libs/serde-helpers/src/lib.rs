use serde::de::Deserializer;
use serde::Deserialize;
use std::time::Duration;

/// Durations are configured as plain millisecond counts.
pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let ms: u64 = Deserialize::deserialize(deserializer)?;
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Timeouts {
        #[serde(deserialize_with = "deserialize_duration")]
        wait: Duration,
    }

    #[test]
    fn should_read_durations_as_milliseconds() {
        let timeouts: Timeouts = serde_json::from_str(r#"{ "wait": 2000 }"#).unwrap();
        assert_eq!(timeouts.wait, Duration::from_secs(2));
    }
}
