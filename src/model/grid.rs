use std::collections::HashSet;

use crate::model::creature::Creature;
use crate::model::favorites::Favorites;
use crate::model::filter::{Filter, Filterable};

/// A rendered record. Cards are only ever hidden, never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub hidden: bool,
}

impl Filterable for Card {
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

#[derive(Debug, Default)]
pub struct Grid {
    cards: Vec<Card>,
    rendered: HashSet<u32>,
    visible: usize,
}

impl Grid {
    /// Appends a card for `creature`. Returns false if that id is already on the grid.
    pub fn render(&mut self, creature: &Creature) -> bool {
        if !self.rendered.insert(creature.id) {
            return false;
        }

        self.cards.push(Card {
            id: creature.id,
            name: creature.name.clone(),
            types: creature.types.clone(),
            hidden: false,
        });
        self.visible += 1;
        true
    }

    /// Re-evaluates every card and returns how many remain visible.
    pub fn apply_filters(&mut self, filter: &Filter, favorites: &Favorites) -> usize {
        let mut visible = 0;
        for card in &mut self.cards {
            card.hidden = !filter.matches(&*card, favorites);
            if !card.hidden {
                visible += 1;
            }
        }
        self.visible = visible;
        visible
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| !c.hidden)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn is_empty_view(&self) -> bool {
        self.visible == 0
    }
}
