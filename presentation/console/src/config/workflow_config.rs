use std::env;
use std::time::Duration;

use anyhow::Context;
use business::application::workflow::settings::WorkflowSettings;

/// Load workflow timing from environment variables
///
/// Environment variables:
/// - NOTIFICATION_WINDOW_MS: How long notifications stay visible (default: 3000)
/// - LOADING_DELAY_MS: Pause before each request (default: 1000)
pub fn from_env() -> anyhow::Result<WorkflowSettings> {
    from_lookup(|key| env::var(key).ok())
}

pub(crate) fn from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<WorkflowSettings> {
    let defaults = WorkflowSettings::default();

    let notification_window = millis(&lookup, "NOTIFICATION_WINDOW_MS")?
        .unwrap_or(defaults.notification_window);
    if notification_window.is_zero() {
        anyhow::bail!("NOTIFICATION_WINDOW_MS must be positive");
    }

    let loading_delay =
        millis(&lookup, "LOADING_DELAY_MS")?.unwrap_or(defaults.loading_delay);

    Ok(WorkflowSettings {
        notification_window,
        loading_delay,
    })
}

fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> anyhow::Result<Option<Duration>> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .with_context(|| format!("{key} is not a number of milliseconds: {raw}"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_defaults_when_unset() {
        let settings = from_lookup(|_| None).unwrap();

        assert_eq!(settings, WorkflowSettings::default());
    }

    #[test]
    fn should_read_overrides() {
        let settings = from_lookup(|key| match key {
            "NOTIFICATION_WINDOW_MS" => Some("1500".to_string()),
            "LOADING_DELAY_MS" => Some("0".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(settings.notification_window, Duration::from_millis(1500));
        assert_eq!(settings.loading_delay, Duration::ZERO);
    }

    #[test]
    fn should_reject_zero_window() {
        let result = from_lookup(|key| (key == "NOTIFICATION_WINDOW_MS").then(|| "0".to_string()));

        assert!(result.is_err());
    }
}
