//! View model built from a catalog.
//!
//! A [`CatalogView`] is everything a front end needs to draw the list and the
//! signup select. It is rebuilt from scratch on every load.

use crate::delegate::RemovalTag;
use crate::model::Catalog;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    pub cards: Vec<ActivityCard>,
    /// Values for the signup select, one per activity.
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: Vec<ParticipantEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEntry {
    pub email: String,
    pub remove: RemovalTag,
}

impl CatalogView {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut view = Self {
            cards: Vec::with_capacity(catalog.len()),
            options: Vec::with_capacity(catalog.len()),
        };

        for (name, activity) in catalog.iter() {
            let participants = activity
                .participants
                .iter()
                .map(|email| ParticipantEntry {
                    email: email.clone(),
                    remove: RemovalTag::new(name, email.as_str()),
                })
                .collect();

            view.cards.push(ActivityCard {
                name: name.to_string(),
                description: activity.description.clone(),
                schedule: activity.schedule.clone(),
                spots_left: activity.spots_left(),
                participants,
            });
            view.options.push(name.to_string());
        }

        view
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl ActivityCard {
    pub fn availability(&self) -> String {
        format!("{} spots left", self.spots_left)
    }
}
