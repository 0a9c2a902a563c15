//! Built-in word and character libraries.

use fabrica_core::{CharClass, WordClass};

pub(crate) const NAMES: &[&str] = &[
    "Ada", "Alan", "Amara", "Bruno", "Carla", "Chen", "Dana", "Diego", "Elif", "Emma", "Felix",
    "Grace", "Hana", "Igor", "Ines", "Ivan", "Jonas", "Kai", "Lena", "Liam", "Lucia", "Marta",
    "Milan", "Nadia", "Noah", "Omar", "Priya", "Rosa", "Sven", "Tariq", "Uma", "Vera", "Yuki",
    "Zara",
];

pub(crate) const ADJECTIVES: &[&str] = &[
    "ancient", "bitter", "brave", "bright", "calm", "clever", "cold", "curious", "dark", "eager",
    "fancy", "fierce", "gentle", "golden", "happy", "heavy", "hollow", "humble", "lively", "loud",
    "lucky", "mellow", "narrow", "proud", "quiet", "rapid", "rough", "round", "silent", "simple",
    "smooth", "steep", "sturdy", "tiny", "vivid", "warm",
];

pub(crate) const COUNTRIES: &[&str] = &[
    "Argentina", "Australia", "Austria", "Belgium", "Brazil", "Canada", "Chile", "China",
    "Denmark", "Egypt", "Finland", "France", "Germany", "Greece", "Hungary", "India", "Ireland",
    "Italy", "Japan", "Kenya", "Mexico", "Morocco", "Netherlands", "Norway", "Peru", "Poland",
    "Portugal", "Spain", "Sweden", "Turkey", "Uruguay", "Vietnam",
];

pub(crate) const NOUNS: &[&str] = &[
    "anchor", "basket", "bridge", "candle", "castle", "cloud", "compass", "crystal", "desert",
    "engine", "feather", "forest", "garden", "glacier", "hammer", "harbor", "island", "kettle",
    "ladder", "lantern", "marble", "meadow", "mirror", "needle", "ocean", "orchard", "pebble",
    "ribbon", "river", "saddle", "shadow", "signal", "summit", "thread", "valley", "window",
];

pub(crate) const TLDS: &[&str] = &[
    "com", "net", "org", "io", "dev", "app", "co", "ai", "xyz", "info", "biz", "me", "tv", "us",
    "uk", "ca", "de", "fr", "es", "it", "nl", "se", "no", "jp", "cn", "in", "br", "au", "ru",
    "ch",
];

pub(crate) const DIGIT_CHARS: &str = "0123456789";
pub(crate) const LETTER_CHARS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
pub(crate) const SYMBOL_CHARS: &str = "!@#$%^&*()_-+=[]{}|;:,.<>?";

pub(crate) fn word_pool(class: WordClass) -> &'static [&'static str] {
    match class {
        WordClass::Name => NAMES,
        WordClass::Adjective => ADJECTIVES,
        WordClass::Country => COUNTRIES,
        WordClass::Noun => NOUNS,
    }
}

pub(crate) fn char_pool(class: CharClass) -> &'static str {
    match class {
        CharClass::Number => DIGIT_CHARS,
        CharClass::Letter => LETTER_CHARS,
        CharClass::Symbol => SYMBOL_CHARS,
    }
}
