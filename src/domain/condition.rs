//! Weather icon codes and the conditions they resolve to.
//!
//! Icon codes follow the OpenWeather shape `"<2-digit-code><d|n>"`
//! (`"01d"`, `"10n"`). Resolution is total: anything that does not
//! match a known prefix falls back to a clear sky rather than failing.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
    Mist,
}

/// Visual element family a condition animates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleClass {
    Sun,
    Cloud,
    Rain,
    Snow,
    Thunderstorm,
    Mist,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 6] = [
        WeatherCondition::Clear,
        WeatherCondition::Clouds,
        WeatherCondition::Rain,
        WeatherCondition::Snow,
        WeatherCondition::Thunderstorm,
        WeatherCondition::Mist,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear sky",
            WeatherCondition::Clouds => "Clouds",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Mist => "Mist",
        }
    }

    /// Canonical icon prefix, used when jumping to a condition by key.
    #[must_use]
    pub fn icon_prefix(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "01",
            WeatherCondition::Clouds => "03",
            WeatherCondition::Rain => "10",
            WeatherCondition::Snow => "13",
            WeatherCondition::Thunderstorm => "11",
            WeatherCondition::Mist => "50",
        }
    }
}

#[must_use]
pub fn condition_particle_class(condition: WeatherCondition) -> ParticleClass {
    match condition {
        WeatherCondition::Clear => ParticleClass::Sun,
        WeatherCondition::Clouds => ParticleClass::Cloud,
        WeatherCondition::Rain => ParticleClass::Rain,
        WeatherCondition::Snow => ParticleClass::Snow,
        WeatherCondition::Thunderstorm => ParticleClass::Thunderstorm,
        WeatherCondition::Mist => ParticleClass::Mist,
    }
}

#[must_use]
pub fn resolve_condition(icon_code: &str) -> WeatherCondition {
    match icon_code.get(..2) {
        Some("01") => WeatherCondition::Clear,
        Some("02" | "03" | "04") => WeatherCondition::Clouds,
        Some("09" | "10") => WeatherCondition::Rain,
        Some("11") => WeatherCondition::Thunderstorm,
        Some("13") => WeatherCondition::Snow,
        Some("50") => WeatherCondition::Mist,
        _ => WeatherCondition::Clear,
    }
}

/// A raw icon code, kept verbatim so it can be re-applied later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconCode(String);

impl IconCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn condition(&self) -> WeatherCondition {
        resolve_condition(&self.0)
    }

    #[must_use]
    pub fn is_night(&self) -> bool {
        self.0.ends_with('n')
    }
}

impl std::fmt::Display for IconCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
