/// One catalog entry, projected from the API payload.
/// Never mutated after it leaves the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,

    /// Decimetres
    pub height: u32,
    /// Hectograms
    pub weight: u32,

    pub abilities: Vec<String>,
    pub stats: Vec<BaseStat>,
    pub art: ArtSet,
    pub cry: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseStat {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtSet {
    pub dream_world: Option<String>,
    pub official: Option<String>,
    pub official_shiny: Option<String>,
    pub front: Option<String>,
    pub front_shiny: Option<String>,
}

impl ArtSet {
    /// First displayable image for the current mode.
    pub fn pick(&self, shiny: bool) -> Option<&str> {
        let chain: [&Option<String>; 4] = if shiny {
            [
                &self.official_shiny,
                &self.front_shiny,
                &self.official,
                &self.front,
            ]
        } else {
            [&self.dream_world, &self.official, &self.front, &None]
        };

        chain
            .into_iter()
            .filter_map(|url| url.as_deref())
            .find(|url| is_raster(url))
    }
}

// egui can only show what the image crate decodes; dream-world art is SVG.
fn is_raster(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    !lower.ends_with(".svg")
}

impl Creature {
    pub fn art_url(&self, shiny: bool) -> Option<&str> {
        self.art.pick(shiny)
    }

    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    pub fn title(&self) -> String {
        format!("#{} · {}", pad_id(self.id), capitalize(&self.name))
    }

    pub fn height_label(&self) -> String {
        format!("{:.1} m", self.height as f32 / 10.0)
    }

    pub fn weight_label(&self) -> String {
        format!("{:.1} kg", self.weight as f32 / 10.0)
    }

    pub fn abilities_label(&self) -> String {
        self.abilities
            .iter()
            .map(|a| capitalize(a))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `7` -> `"007"`; wider ids are left alone.
pub fn pad_id(id: u32) -> String {
    format!("{:03}", id)
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Share of the 200-point scale a stat bar fills, in whole percent.
pub fn stat_percent(value: u32) -> u32 {
    let pct = (value.saturating_mul(100).saturating_add(100)) / 200;
    pct.min(100)
}

/* =========================
   Wire format
   ========================= */

pub mod wire {
    use serde::Deserialize;

    use super::{ArtSet, BaseStat, Creature};

    #[derive(Debug, Deserialize)]
    pub struct CreaturePayload {
        pub id: u32,
        pub name: String,
        #[serde(default)]
        pub height: u32,
        #[serde(default)]
        pub weight: u32,
        #[serde(default)]
        pub types: Vec<TypeSlot>,
        #[serde(default)]
        pub abilities: Vec<AbilitySlot>,
        #[serde(default)]
        pub stats: Vec<StatSlot>,
        #[serde(default)]
        pub sprites: Sprites,
        #[serde(default)]
        pub cries: Option<Cries>,
    }

    #[derive(Debug, Deserialize)]
    pub struct NamedResource {
        pub name: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct TypeSlot {
        #[serde(rename = "type")]
        pub kind: NamedResource,
    }

    #[derive(Debug, Deserialize)]
    pub struct AbilitySlot {
        pub ability: NamedResource,
    }

    #[derive(Debug, Deserialize)]
    pub struct StatSlot {
        pub stat: NamedResource,
        pub base_stat: u32,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct Sprites {
        pub front_default: Option<String>,
        pub front_shiny: Option<String>,
        #[serde(default)]
        pub other: OtherSprites,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct OtherSprites {
        pub dream_world: Option<SpriteVariant>,
        #[serde(rename = "official-artwork")]
        pub official_artwork: Option<SpriteVariant>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct SpriteVariant {
        pub front_default: Option<String>,
        pub front_shiny: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct Cries {
        pub latest: Option<String>,
        pub legacy: Option<String>,
    }

    /// `GET /type` listing
    #[derive(Debug, Deserialize)]
    pub struct ResourceList {
        pub results: Vec<NamedResource>,
    }

    impl From<CreaturePayload> for Creature {
        fn from(p: CreaturePayload) -> Self {
            let other = p.sprites.other;
            let official = other.official_artwork.unwrap_or_default();

            Creature {
                id: p.id,
                name: p.name,
                types: p.types.into_iter().map(|t| t.kind.name).collect(),
                height: p.height,
                weight: p.weight,
                abilities: p.abilities.into_iter().map(|a| a.ability.name).collect(),
                stats: p
                    .stats
                    .into_iter()
                    .map(|s| BaseStat {
                        name: s.stat.name,
                        value: s.base_stat,
                    })
                    .collect(),
                art: ArtSet {
                    dream_world: other.dream_world.and_then(|d| d.front_default),
                    official: official.front_default,
                    official_shiny: official.front_shiny,
                    front: p.sprites.front_default,
                    front_shiny: p.sprites.front_shiny,
                },
                cry: p.cries.and_then(|c| c.latest.or(c.legacy)),
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn sample(id: u32, name: &str, types: &[&str]) -> Creature {
    Creature {
        id,
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        height: 7,
        weight: 69,
        abilities: vec!["overgrow".into()],
        stats: vec![BaseStat {
            name: "hp".into(),
            value: 45,
        }],
        art: ArtSet {
            official: Some(format!("https://img.test/{id}.png")),
            ..Default::default()
        },
        cry: None,
    }
}
