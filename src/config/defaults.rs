use super::Config;

/// Config written on first start.
pub fn defaults() -> Config {
    Config::default()
}
