/// The eighteen standard types, used when the live listing is unavailable.
pub const STANDARD_CATEGORIES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// Card background per primary type, as RGB.
pub fn background_rgb(category: &str) -> [u8; 3] {
    match category {
        "normal" => [0xF5, 0xF5, 0xF5],
        "fire" => [0xFD, 0xDF, 0xDF],
        "water" => [0xDE, 0xF3, 0xFD],
        "electric" => [0xFC, 0xF7, 0xDE],
        "grass" => [0xDE, 0xFD, 0xE0],
        "ice" => [0xE0, 0xF7, 0xFA],
        "fighting" => [0xE6, 0xE0, 0xD4],
        "poison" => [0xE5, 0xD4, 0xF5],
        "ground" => [0xF4, 0xE7, 0xDA],
        "flying" => [0xF5, 0xF5, 0xF5],
        "psychic" => [0xEA, 0xED, 0xA1],
        "bug" => [0xF8, 0xD5, 0xA3],
        "rock" => [0xD5, 0xD5, 0xD4],
        "ghost" => [0xE8, 0xE8, 0xFF],
        "dragon" => [0x97, 0xB3, 0xE6],
        "dark" => [0xDD, 0xD6, 0xFE],
        "steel" => [0xE2, 0xE8, 0xF0],
        "fairy" => [0xFC, 0xEA, 0xFF],
        _ => [0xEE, 0xEE, 0xEE],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_standard_category_has_its_own_colour_entry() {
        for c in STANDARD_CATEGORIES {
            assert_ne!(background_rgb(c), [0xEE, 0xEE, 0xEE], "{c}");
        }
        assert_eq!(background_rgb("stellar"), [0xEE, 0xEE, 0xEE]);
    }
}
