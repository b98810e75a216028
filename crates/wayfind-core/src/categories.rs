//! Static catalog of place categories and their OpenStreetMap tag predicates.
//!
//! A category matches an element when *any* of its predicates matches, so
//! `clinic` covers both `amenity=clinic` and `amenity=doctors`.

use serde::Serialize;
use thiserror::Error;

/// Icon used when a category id has no dedicated icon.
pub const DEFAULT_ICON: &str = "\u{1F4CD}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("category not found: {0}")]
pub struct UnknownCategory(pub String);

/// A single `key=value` tag match in Overpass vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagPredicate {
    pub key: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    Food,
    Health,
    Finance,
    Transport,
    Shopping,
    Lodging,
    Culture,
    Leisure,
    PublicServices,
    Religion,
}

impl CategoryGroup {
    pub const ALL: [CategoryGroup; 10] = [
        CategoryGroup::Food,
        CategoryGroup::Health,
        CategoryGroup::Finance,
        CategoryGroup::Transport,
        CategoryGroup::Shopping,
        CategoryGroup::Lodging,
        CategoryGroup::Culture,
        CategoryGroup::Leisure,
        CategoryGroup::PublicServices,
        CategoryGroup::Religion,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryGroup::Food => "food",
            CategoryGroup::Health => "health",
            CategoryGroup::Finance => "finance",
            CategoryGroup::Transport => "transport",
            CategoryGroup::Shopping => "shopping",
            CategoryGroup::Lodging => "lodging",
            CategoryGroup::Culture => "culture",
            CategoryGroup::Leisure => "leisure",
            CategoryGroup::PublicServices => "public_services",
            CategoryGroup::Religion => "religion",
        }
    }
}

impl std::fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CategoryGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryGroup::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| format!("unknown category group: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub group: CategoryGroup,
    pub tags: &'static [TagPredicate],
}

const fn tag(key: &'static str, value: &'static str) -> TagPredicate {
    TagPredicate { key, value }
}

const fn category(
    id: &'static str,
    display_name: &'static str,
    icon: &'static str,
    group: CategoryGroup,
    tags: &'static [TagPredicate],
) -> Category {
    Category {
        id,
        display_name,
        icon,
        group,
        tags,
    }
}

use CategoryGroup::{
    Culture, Finance, Food, Health, Leisure, Lodging, PublicServices, Religion, Shopping,
    Transport,
};

#[rustfmt::skip]
static CATALOG: &[Category] = &[
    category(
        "restaurant",
        "Restaurants",
        "\u{1F37D}\u{FE0F}",
        Food,
        &[tag("amenity", "restaurant")],
    ),
    category("cafe", "Cafes", "\u{2615}", Food, &[tag("amenity", "cafe")]),
    category("fast_food", "Fast Food", "\u{1F354}", Food, &[tag("amenity", "fast_food")]),
    category("bar", "Bars", "\u{1F37A}", Food, &[tag("amenity", "bar")]),
    category("pub", "Pubs", "\u{1F37B}", Food, &[tag("amenity", "pub")]),
    category("hospital", "Hospitals", "\u{1F3E5}", Health, &[tag("amenity", "hospital")]),
    category("pharmacy", "Pharmacies", "\u{1F48A}", Health, &[tag("amenity", "pharmacy")]),
    category(
        "clinic",
        "Clinics",
        "\u{1F3E5}",
        Health,
        &[tag("amenity", "clinic"), tag("amenity", "doctors")],
    ),
    category("dentist", "Dentists", "\u{1F9B7}", Health, &[tag("amenity", "dentist")]),
    category("bank", "Banks", "\u{1F3E6}", Finance, &[tag("amenity", "bank")]),
    category("atm", "ATMs", "\u{1F4B3}", Finance, &[tag("amenity", "atm")]),
    category("fuel", "Gas Stations", "\u{26FD}", Transport, &[tag("amenity", "fuel")]),
    category("parking", "Parking", "\u{1F17F}\u{FE0F}", Transport, &[tag("amenity", "parking")]),
    category("bus_stop", "Bus Stops", "\u{1F68C}", Transport, &[tag("highway", "bus_stop")]),
    category("supermarket", "Supermarkets", "\u{1F6D2}", Shopping, &[tag("shop", "supermarket")]),
    category(
        "convenience",
        "Convenience Stores",
        "\u{1F3EA}",
        Shopping,
        &[tag("shop", "convenience")],
    ),
    category(
        "marketplace",
        "Marketplaces",
        "\u{1F6CD}\u{FE0F}",
        Shopping,
        &[tag("amenity", "marketplace")],
    ),
    category("hotel", "Hotels", "\u{1F3E8}", Lodging, &[tag("tourism", "hotel")]),
    category("guest_house", "Guest Houses", "\u{1F3E1}", Lodging, &[tag("tourism", "guest_house")]),
    category("hostel", "Hostels", "\u{1F3E0}", Lodging, &[tag("tourism", "hostel")]),
    category("museum", "Museums", "\u{1F3DB}\u{FE0F}", Culture, &[tag("tourism", "museum")]),
    category("library", "Libraries", "\u{1F4DA}", Culture, &[tag("amenity", "library")]),
    category("cinema", "Cinemas", "\u{1F3AC}", Culture, &[tag("amenity", "cinema")]),
    category("theatre", "Theatres", "\u{1F3AD}", Culture, &[tag("amenity", "theatre")]),
    category(
        "viewpoint",
        "Viewpoints",
        "\u{1F441}\u{FE0F}",
        Leisure,
        &[tag("tourism", "viewpoint")],
    ),
    category("playground", "Playgrounds", "\u{1F6DD}", Leisure, &[tag("leisure", "playground")]),
    category(
        "fitness",
        "Fitness Centers",
        "\u{1F4AA}",
        Leisure,
        &[tag("leisure", "fitness_centre")],
    ),
    category("golf", "Golf Courses", "\u{26F3}", Leisure, &[tag("leisure", "golf_course")]),
    category(
        "toilets",
        "Public Toilets",
        "\u{1F6BB}",
        PublicServices,
        &[tag("amenity", "toilets")],
    ),
    category("police", "Police Stations", "\u{1F46E}", PublicServices, &[tag("amenity", "police")]),
    category(
        "fire_station",
        "Fire Stations",
        "\u{1F692}",
        PublicServices,
        &[tag("amenity", "fire_station")],
    ),
    category(
        "place_of_worship",
        "Places of Worship",
        "\u{26EA}",
        Religion,
        &[tag("amenity", "place_of_worship")],
    ),
];

/// Every category in catalog order.
#[must_use]
pub fn all() -> &'static [Category] {
    CATALOG
}

/// Resolve a category by id.
///
/// # Errors
///
/// Returns [`UnknownCategory`] when no category has the given id.
pub fn lookup(id: &str) -> Result<&'static Category, UnknownCategory> {
    CATALOG
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| UnknownCategory(id.to_string()))
}

pub fn by_group(group: CategoryGroup) -> impl Iterator<Item = &'static Category> {
    CATALOG.iter().filter(move |c| c.group == group)
}

#[must_use]
pub fn icon_for(id: &str) -> &'static str {
    lookup(id).map_or(DEFAULT_ICON, |c| c.icon)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_has_at_least_thirty_categories() {
        assert!(all().len() >= 30, "got {}", all().len());
    }

    #[test]
    fn category_ids_are_unique() {
        let ids: HashSet<&str> = all().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn every_category_has_a_predicate() {
        for c in all() {
            assert!(!c.tags.is_empty(), "{} has no tags", c.id);
        }
    }

    #[test]
    fn every_group_is_populated() {
        for group in CategoryGroup::ALL {
            assert!(by_group(group).next().is_some(), "{group} is empty");
        }
    }

    #[test]
    fn lookup_clinic_has_two_alternatives() {
        let clinic = lookup("clinic").unwrap();
        assert_eq!(
            clinic.tags,
            &[tag("amenity", "clinic"), tag("amenity", "doctors")]
        );
    }

    #[test]
    fn lookup_unknown_fails() {
        let err = lookup("not_a_category").unwrap_err();
        assert_eq!(err, UnknownCategory("not_a_category".to_string()));
        assert_eq!(err.to_string(), "category not found: not_a_category");
    }

    #[test]
    fn icon_for_unknown_falls_back_to_pin() {
        assert_eq!(icon_for("nope"), DEFAULT_ICON);
        assert_eq!(icon_for("cafe"), "\u{2615}");
    }

    #[test]
    fn group_parses_from_str() {
        assert_eq!(
            "public_services".parse::<CategoryGroup>(),
            Ok(CategoryGroup::PublicServices)
        );
        assert!("nightlife".parse::<CategoryGroup>().is_err());
    }

    #[test]
    fn category_serializes_group_as_snake_case() {
        let json = serde_json::to_value(lookup("toilets").unwrap()).unwrap();
        assert_eq!(json["group"], "public_services");
        assert_eq!(json["tags"][0]["key"], "amenity");
    }
}
