use tick_config::TicklerConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &TicklerConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &TicklerConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.smtp.is_configured() && has_env_prefix(&env_keys, "TICKLER_SMTP") {
        warnings.push(
            "SMTP config appears default while TICKLER_SMTP* env vars exist. Use double underscores (example: TICKLER_SMTP__HOST)."
                .to_string(),
        );
    }

    if !config.gemini.is_configured() && has_env_prefix(&env_keys, "TICKLER_GEMINI") {
        warnings.push(
            "Gemini config appears default while TICKLER_GEMINI* env vars exist. Use double underscores (example: TICKLER_GEMINI__API_KEY)."
                .to_string(),
        );
    }

    if config.database.path.is_empty() && has_env_prefix(&env_keys, "TICKLER_DATABASE") {
        warnings.push(
            "Database path appears default while TICKLER_DATABASE* env vars exist. Use double underscores (example: TICKLER_DATABASE__PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
