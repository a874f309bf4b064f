use crate::model::creature::pad_id;
use crate::model::favorites::Favorites;

/// The three independent filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub search: String,
    pub category: Option<String>,
    pub favorites_only: bool,
}

/// What the predicate needs to know about a rendered card.
pub trait Filterable {
    fn id(&self) -> u32;
    fn name(&self) -> &str;
    fn types(&self) -> &[String];
}

impl Filter {
    pub fn clear(&mut self) {
        *self = Filter::default();
    }

    pub fn is_active(&self) -> bool {
        !self.normalized_query().is_empty() || self.category.is_some() || self.favorites_only
    }

    fn normalized_query(&self) -> String {
        self.search.trim().to_lowercase()
    }

    pub fn matches<T: Filterable + ?Sized>(&self, item: &T, favorites: &Favorites) -> bool {
        let query = self.normalized_query();
        passes_text(&query, item.name(), item.id())
            && passes_category(self.category.as_deref(), item.types())
            && passes_favorites(self.favorites_only, favorites, item.id())
    }
}

fn passes_text(query: &str, name: &str, id: u32) -> bool {
    query.is_empty()
        || name.contains(query)
        || pad_id(id).contains(query)
        || id.to_string() == query
}

fn passes_category(category: Option<&str>, types: &[String]) -> bool {
    match category {
        None => true,
        Some(c) => types.iter().any(|t| t == c),
    }
}

fn passes_favorites(favorites_only: bool, favorites: &Favorites, id: u32) -> bool {
    !favorites_only || favorites.contains(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        id: u32,
        name: String,
        types: Vec<String>,
    }

    impl Filterable for Item {
        fn id(&self) -> u32 {
            self.id
        }
        fn name(&self) -> &str {
            &self.name
        }
        fn types(&self) -> &[String] {
            &self.types
        }
    }

    fn item(id: u32, name: &str, types: &[&str]) -> Item {
        Item {
            id,
            name: name.into(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn empty_filter_passes_everything() {
        let f = Filter::default();
        assert!(!f.is_active());
        assert!(f.matches(&item(1, "bulbasaur", &["grass"]), &Favorites::default()));
    }

    #[test]
    fn search_matches_name_padded_id_and_exact_id() {
        let favs = Favorites::default();
        let pikachu = item(25, "pikachu", &["electric"]);

        let mut f = Filter {
            search: "  PIKA ".into(),
            ..Default::default()
        };
        assert!(f.matches(&pikachu, &favs));

        f.search = "025".into();
        assert!(f.matches(&pikachu, &favs));

        f.search = "02".into();
        assert!(f.matches(&pikachu, &favs));

        f.search = "25".into();
        assert!(f.matches(&pikachu, &favs));

        f.search = "26".into();
        assert!(!f.matches(&pikachu, &favs));

        f.search = "chu".into();
        assert!(!f.matches(&item(1, "bulbasaur", &["grass"]), &favs));
    }

    #[test]
    fn category_requires_membership() {
        let favs = Favorites::default();
        let f = Filter {
            category: Some("poison".into()),
            ..Default::default()
        };
        assert!(f.matches(&item(1, "bulbasaur", &["grass", "poison"]), &favs));
        assert!(!f.matches(&item(4, "charmander", &["fire"]), &favs));
    }

    #[test]
    fn favorites_only_requires_star() {
        let mut favs = Favorites::default();
        favs.toggle(4);
        let f = Filter {
            favorites_only: true,
            ..Default::default()
        };
        assert!(f.matches(&item(4, "charmander", &["fire"]), &favs));
        assert!(!f.matches(&item(5, "charmeleon", &["fire"]), &favs));
    }

    #[test]
    fn predicate_is_conjunction_of_all_three() {
        let mut favs = Favorites::default();
        favs.toggle(6);
        let candidates = [
            item(4, "charmander", &["fire"]),
            item(6, "charizard", &["fire", "flying"]),
            item(12, "butterfree", &["bug", "flying"]),
        ];

        let searches = ["", "char", "zzz"];
        let categories = [None, Some("flying"), Some("water")];

        for search in searches {
            for category in categories {
                for favorites_only in [false, true] {
                    let f = Filter {
                        search: search.into(),
                        category: category.map(String::from),
                        favorites_only,
                    };
                    for c in &candidates {
                        let expected = passes_text(search, &c.name, c.id)
                            && passes_category(category, &c.types)
                            && passes_favorites(favorites_only, &favs, c.id);
                        assert_eq!(f.matches(c, &favs), expected, "{f:?} on {}", c.name);
                    }
                }
            }
        }

        let all_three = Filter {
            search: "char".into(),
            category: Some("flying".into()),
            favorites_only: true,
        };
        let hits: Vec<u32> = candidates
            .iter()
            .filter(|c| all_three.matches(*c, &favs))
            .map(|c| c.id)
            .collect();
        assert_eq!(hits, vec![6]);
    }

    #[test]
    fn clear_resets_every_control() {
        let mut f = Filter {
            search: "x".into(),
            category: Some("fire".into()),
            favorites_only: true,
        };
        assert!(f.is_active());
        f.clear();
        assert_eq!(f, Filter::default());
    }
}
