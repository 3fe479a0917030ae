use photoforged::config::LogEnv;

/// Default filter when `RUST_LOG` is unset.
pub fn default_filter(env: LogEnv, verbose: bool) -> String {
    let (level, http) = if verbose {
        ("trace", "debug")
    } else {
        (env.default_level(), "info")
    };
    format!("photoforged={level},pf_core={level},pf_pipeline={level},tower_http={http}")
}

/// Install the global subscriber. The format follows the environment:
/// pretty for local work, JSON for dev, compact text for prod.
pub fn init(env: LogEnv, verbose: bool) {
    // Respect RUST_LOG env var if set
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(env, verbose));

    let builder = tracing_subscriber::fmt().with_env_filter(&env_filter);
    match env {
        LogEnv::Local => builder.pretty().init(),
        LogEnv::Dev => builder.json().init(),
        LogEnv::Prod => builder.compact().with_ansi(false).init(),
    }
}
