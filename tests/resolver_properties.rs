use proptest::prelude::*;
use skywash::domain::condition::{IconCode, WeatherCondition, resolve_condition};

const KNOWN_PREFIXES: [&str; 9] = ["01", "02", "03", "04", "09", "10", "11", "13", "50"];

proptest! {
    #[test]
    fn resolver_never_fails_on_arbitrary_input(code in ".*") {
        // Totality: any string resolves to some condition.
        let _ = resolve_condition(&code);
        let _ = IconCode::new(code.clone()).is_night();
    }

    #[test]
    fn unknown_numeric_prefixes_fall_back_to_clear(
        prefix in "[0-9]{2}",
        suffix in "[dn]",
    ) {
        prop_assume!(!KNOWN_PREFIXES.contains(&prefix.as_str()));
        let code = format!("{prefix}{suffix}");
        prop_assert_eq!(resolve_condition(&code), WeatherCondition::Clear);
    }

    #[test]
    fn suffix_never_changes_the_condition(prefix in "[0-9]{2}") {
        prop_assert_eq!(
            resolve_condition(&format!("{prefix}d")),
            resolve_condition(&format!("{prefix}n"))
        );
    }
}

#[test]
fn documented_prefix_table() {
    let table = [
        ("01d", WeatherCondition::Clear),
        ("02d", WeatherCondition::Clouds),
        ("03n", WeatherCondition::Clouds),
        ("04d", WeatherCondition::Clouds),
        ("09n", WeatherCondition::Rain),
        ("10d", WeatherCondition::Rain),
        ("11n", WeatherCondition::Thunderstorm),
        ("13d", WeatherCondition::Snow),
        ("50n", WeatherCondition::Mist),
        ("77d", WeatherCondition::Clear),
        ("", WeatherCondition::Clear),
    ];
    for (code, expected) in table {
        assert_eq!(resolve_condition(code), expected, "{code:?}");
    }
}
