use anyhow::{Context, Result};
use regex::Regex;
use std::fmt;

/// The weather categories a forecast description can classify into.
///
/// Each variant carries a canonical lowercase label which doubles as the
/// asset-store key, so the label strings must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Sunny,
    Cloudy,
    MostlyCloudy,
    PartlyCloudy,
    Rainy,
    LightRain,
    Snowy,
    Foggy,
    Lightning,
    Hail,
}

impl Kind {
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Sunny => "sunny",
            Kind::Cloudy => "cloudy",
            Kind::MostlyCloudy => "mostly cloudy",
            Kind::PartlyCloudy => "partly cloudy",
            Kind::Rainy => "rainy",
            Kind::LightRain => "light rain",
            Kind::Snowy => "snowy",
            Kind::Foggy => "foggy",
            Kind::Lightning => "lightning",
            Kind::Hail => "hail",
        }
    }

    pub const fn all() -> &'static [Kind] {
        &[
            Kind::Sunny,
            Kind::Cloudy,
            Kind::MostlyCloudy,
            Kind::PartlyCloudy,
            Kind::Rainy,
            Kind::LightRain,
            Kind::Snowy,
            Kind::Foggy,
            Kind::Lightning,
            Kind::Hail,
        ]
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const LIGHTNING_PATTERNS: &[&str] = &[
    "thunderstorm|thunderstorms|thunder",
    r"t[\s-]?storms?|t[\s-]?storm",
    // METAR shorthand for thunderstorms in/near the area
    "tsra|vcts",
    "squall",
    "lightning",
];

const RAIN_PATTERNS: &[&str] = &[
    "rain|rains|rainfall",
    r"showers?|rain\s*showers?",
    "drizzle|sprinkles?",
    "downpour|pouring",
    "precip(itation)?",
    r"chance\s+rain|likely\s+rain|periods?\s+of\s+rain",
    r"scattered\s+showers?|isolated\s+showers?",
    r"slight\s+chance\s+showers?",
];

const SNOW_PATTERNS: &[&str] = &[
    "snow|snows|snowfall",
    r"flurries|snow\s*flurries",
    r"snow\s*showers?",
    "blizzard",
    r"blowing\s+snow|drifting\s+snow",
    r"snow\s*squalls?",
    r"lake[-\s]?effect\s+snow",
];

// Ice phrases that are neither cleanly rain nor snow.
const WINTRY_PATTERNS: &[&str] = &[
    r"wintry\s+mix",
    r"rain\s*/\s*snow|snow\s*/\s*rain",
    r"mix(ed)?\s+precip(itation)?",
    "sleet",
    r"ice\s+pellets?",
    r"freezing\s+rain",
    r"freezing\s+drizzle",
    "glaze|icing",
];

const HAIL_PATTERNS: &[&str] = &["hail", r"small\s+hail", "graupel"];

const FOG_PATTERNS: &[&str] = &[
    "fog|foggy",
    r"patchy\s+fog",
    r"dense\s+fog",
    "mist|misty",
    r"low\s+visibility|reduced\s+visibility",
];

const WIND_PATTERNS: &[&str] = &[
    "windy",
    "breezy",
    "gusty|gusts?",
    "blustery",
    r"strong\s+winds?",
    r"high\s+winds?",
];

const SUNNY_PATTERNS: &[&str] = &[
    "sunny",
    "clear",
    "fair",
    r"mostly\s+sunny",
    "sunshine",
    r"becoming\s+sunny",
    r"sunny\s+and\s+warm",
];

const CLOUDY_PATTERNS: &[&str] = &[
    "cloudy",
    r"mostly\s+cloudy",
    r"partly\s+cloudy",
    r"increasing\s+clouds?",
    r"decreasing\s+clouds?",
    "overcast",
    r"broken\s+clouds?",
    r"scattered\s+clouds?",
];

const LIGHT_RAIN_MARKERS: &[&str] = &["light|slight|drizzle|sprinkle"];

/// Every matcher is case-insensitive and bound to whole words, so "rain"
/// never fires inside "raincoat".
fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(&format!(r"(?i)\b({p})\b"))
                .with_context(|| format!("invalid rule pattern '{p}'"))
        })
        .collect()
}

fn matches_any(text: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(text))
}

/// The phrase categories the cascade draws from, compiled once at startup
/// and read-only afterwards.
///
/// `wintry` and `wind` are loaded with the standard table but the cascade
/// does not consult them yet; they are reserved for future use.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub lightning: Vec<Regex>,
    pub rain: Vec<Regex>,
    pub snow: Vec<Regex>,
    pub wintry: Vec<Regex>,
    pub hail: Vec<Regex>,
    pub fog: Vec<Regex>,
    pub wind: Vec<Regex>,
    pub sunny: Vec<Regex>,
    pub cloudy: Vec<Regex>,
    /// Second-level markers for rain intensity and cloud extent.
    pub light_rain: Vec<Regex>,
    pub mostly: Regex,
    pub partly: Regex,
}

impl RuleSet {
    /// Build the standard rule table.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            lightning: compile_all(LIGHTNING_PATTERNS)?,
            rain: compile_all(RAIN_PATTERNS)?,
            snow: compile_all(SNOW_PATTERNS)?,
            wintry: compile_all(WINTRY_PATTERNS)?,
            hail: compile_all(HAIL_PATTERNS)?,
            fog: compile_all(FOG_PATTERNS)?,
            wind: compile_all(WIND_PATTERNS)?,
            sunny: compile_all(SUNNY_PATTERNS)?,
            cloudy: compile_all(CLOUDY_PATTERNS)?,
            light_rain: compile_all(LIGHT_RAIN_MARKERS)?,
            mostly: Regex::new(r"(?i)\b(mostly)\b").context("invalid 'mostly' marker")?,
            partly: Regex::new(r"(?i)\b(partly)\b").context("invalid 'partly' marker")?,
        })
    }
}

/// Maps a free-text forecast description to exactly one [`Kind`].
///
/// Classification is total: every input, the empty string included, yields a
/// Kind, with [`Kind::Cloudy`] as the no-match default.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleSet,
}

impl Classifier {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Classifier over the standard rule table.
    pub fn standard() -> Result<Self> {
        Ok(Self::new(RuleSet::standard()?))
    }

    /// Walk the categories in priority order, most hazardous first, so a
    /// severe phenomenon is never masked by a co-occurring milder mention
    /// ("rain with lightning" is lightning, not rain). First match wins.
    pub fn classify(&self, description: &str) -> Kind {
        let rules = &self.rules;

        if matches_any(description, &rules.lightning) {
            return Kind::Lightning;
        }

        if matches_any(description, &rules.hail) {
            return Kind::Hail;
        }

        if matches_any(description, &rules.snow) {
            return Kind::Snowy;
        }

        if matches_any(description, &rules.rain) {
            if matches_any(description, &rules.light_rain) {
                return Kind::LightRain;
            }
            return Kind::Rainy;
        }

        if matches_any(description, &rules.fog) {
            return Kind::Foggy;
        }

        if matches_any(description, &rules.sunny) {
            return Kind::Sunny;
        }

        if matches_any(description, &rules.cloudy) {
            if rules.mostly.is_match(description) {
                return Kind::MostlyCloudy;
            }
            if rules.partly.is_match(description) {
                return Kind::PartlyCloudy;
            }
            return Kind::Cloudy;
        }

        Kind::Cloudy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::standard().expect("standard rule table must compile")
    }

    #[test]
    fn empty_and_unrecognized_input_default_to_cloudy() {
        let c = classifier();
        assert_eq!(c.classify(""), Kind::Cloudy);
        assert_eq!(c.classify("lorem ipsum dolor sit amet"), Kind::Cloudy);
    }

    #[test]
    fn lightning_beats_rain() {
        let c = classifier();
        assert_eq!(c.classify("thunderstorms with rain"), Kind::Lightning);
        assert_eq!(c.classify("rain with lightning"), Kind::Lightning);
    }

    #[test]
    fn lightning_beats_hail_in_either_word_order() {
        let c = classifier();
        assert_eq!(c.classify("thunderstorms and hail"), Kind::Lightning);
        assert_eq!(c.classify("hail and thunderstorms"), Kind::Lightning);
    }

    #[test]
    fn hail_beats_snow_and_rain() {
        let c = classifier();
        assert_eq!(c.classify("hail and snow"), Kind::Hail);
        assert_eq!(c.classify("rain turning to hail"), Kind::Hail);
    }

    #[test]
    fn snow_beats_rain() {
        let c = classifier();
        assert_eq!(c.classify("rain and snow expected"), Kind::Snowy);
    }

    #[test]
    fn rain_beats_fog_and_sky_descriptors() {
        let c = classifier();
        assert_eq!(c.classify("rain and fog"), Kind::Rainy);
        assert_eq!(c.classify("cloudy with periods of rain"), Kind::Rainy);
    }

    #[test]
    fn light_intensity_markers_select_light_rain() {
        let c = classifier();
        assert_eq!(c.classify("light rain this afternoon"), Kind::LightRain);
        assert_eq!(c.classify("slight chance showers"), Kind::LightRain);
        assert_eq!(c.classify("drizzle through the morning"), Kind::LightRain);
    }

    #[test]
    fn rain_without_light_markers_stays_rainy() {
        let c = classifier();
        assert_eq!(c.classify("heavy rain expected"), Kind::Rainy);
        assert_eq!(c.classify("downpour later today"), Kind::Rainy);
        // the marker is the whole word "sprinkle", so the plural alone
        // matches only the rain category
        assert_eq!(c.classify("sprinkles expected"), Kind::Rainy);
    }

    #[test]
    fn cloud_extent_disambiguation() {
        let c = classifier();
        assert_eq!(c.classify("mostly cloudy skies"), Kind::MostlyCloudy);
        assert_eq!(c.classify("partly cloudy"), Kind::PartlyCloudy);
        assert_eq!(c.classify("cloudy"), Kind::Cloudy);
        assert_eq!(c.classify("increasing clouds"), Kind::Cloudy);
        assert_eq!(c.classify("overcast all day"), Kind::Cloudy);
    }

    #[test]
    fn mostly_sunny_is_sunny_not_mostly_cloudy() {
        let c = classifier();
        assert_eq!(c.classify("mostly sunny"), Kind::Sunny);
    }

    #[test]
    fn sunny_synonyms() {
        let c = classifier();
        assert_eq!(c.classify("clear tonight"), Kind::Sunny);
        assert_eq!(c.classify("fair and mild"), Kind::Sunny);
        assert_eq!(c.classify("sunshine returns tomorrow"), Kind::Sunny);
    }

    #[test]
    fn fog_synonyms() {
        let c = classifier();
        assert_eq!(c.classify("dense fog advisory"), Kind::Foggy);
        assert_eq!(c.classify("misty morning"), Kind::Foggy);
        assert_eq!(c.classify("reduced visibility near the coast"), Kind::Foggy);
    }

    #[test]
    fn aviation_abbreviations_classify_as_lightning() {
        let c = classifier();
        assert_eq!(c.classify("TSRA in the vicinity"), Kind::Lightning);
        assert_eq!(c.classify("t-storms after midnight"), Kind::Lightning);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let c = classifier();
        assert_eq!(c.classify("THUNDERSTORMS"), Kind::Lightning);
        assert_eq!(c.classify("Light Rain"), Kind::LightRain);
        assert_eq!(c.classify("SNOW SHOWERS"), Kind::Snowy);
    }

    #[test]
    fn word_boundaries_prevent_partial_matches() {
        let c = classifier();
        assert_eq!(c.classify("raincoat sale downtown"), Kind::Cloudy);
        assert_eq!(c.classify("training session at noon"), Kind::Cloudy);
        assert_eq!(c.classify("clearance on winter gear"), Kind::Cloudy);
    }

    #[test]
    fn reserved_categories_fall_through_to_the_default() {
        // wintry and wind are loaded but the cascade does not consult them
        let c = classifier();
        assert_eq!(c.classify("sleet"), Kind::Cloudy);
        assert_eq!(c.classify("freezing drizzle"), Kind::LightRain); // drizzle is a rain pattern
        assert_eq!(c.classify("windy"), Kind::Cloudy);
        assert_eq!(c.classify("strong winds"), Kind::Cloudy);
    }

    #[test]
    fn reserved_categories_are_still_compiled() {
        let rules = RuleSet::standard().unwrap();
        assert!(!rules.wintry.is_empty());
        assert!(!rules.wind.is_empty());
        assert!(matches_any("wintry mix tonight", &rules.wintry));
        assert!(matches_any("gusty conditions", &rules.wind));
    }

    #[test]
    fn classifier_uses_the_injected_rules() {
        let mut rules = RuleSet::standard().unwrap();
        rules.sunny = vec![Regex::new(r"(?i)\b(azure)\b").unwrap()];
        let c = Classifier::new(rules);
        assert_eq!(c.classify("azure skies"), Kind::Sunny);
        assert_eq!(c.classify("sunny"), Kind::Cloudy);
    }

    #[test]
    fn labels_are_unique_and_lowercase() {
        let mut seen = std::collections::HashSet::new();
        for kind in Kind::all() {
            let label = kind.label();
            assert_eq!(label, label.to_lowercase());
            assert!(seen.insert(label), "duplicate label '{label}'");
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn display_matches_label() {
        for kind in Kind::all() {
            assert_eq!(kind.to_string(), kind.label());
        }
    }
}
