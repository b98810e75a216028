//! Plain-text presentation of categories, places and location status.

use std::fmt::Write as _;

use wayfind_core::{categories, Category};
use wayfind_overpass::Place;
use wayfind_search::Located;

pub(crate) fn category_line(category: &Category) -> String {
    let Category {
        id,
        display_name,
        icon,
        ..
    } = category;
    format!("  {icon} {id:<18} {display_name}")
}

pub(crate) fn status_line(located: &Located) -> String {
    format!("{} ({})", located.status, located.coordinate)
}

/// Render a result list the way the sidebar shows it: icon and name, the
/// brand when it differs from the name, the address, then the available
/// badges.
pub(crate) fn places(category_id: &str, places: &[Place]) -> String {
    if places.is_empty() {
        let label = match categories::lookup(category_id) {
            Ok(category) => category.display_name.to_lowercase(),
            Err(_) => "places".to_string(),
        };
        return format!("No {label} found nearby");
    }

    let icon = categories::icon_for(category_id);
    let mut out = String::new();
    for place in places {
        let _ = write!(out, "{icon} {}", place.name);
        if let Some(brand) = place.brand.as_deref().filter(|b| *b != place.name) {
            let _ = write!(out, " ({brand})");
        }
        let _ = writeln!(out, "\n   {}", place.address);

        let mut badges = Vec::new();
        if let Some(km) = place.distance_km {
            badges.push(format!("\u{1F4CD} {km:.1} km"));
        }
        if let Some(cuisine) = &place.cuisine {
            badges.push(format!("\u{1F37D}\u{FE0F} {cuisine}"));
        }
        if let Some(phone) = &place.phone {
            badges.push(format!("\u{1F4DE} {phone}"));
        }
        if let Some(hours) = &place.opening_hours {
            badges.push(format!("\u{1F550} {hours}"));
        }
        if !badges.is_empty() {
            let _ = writeln!(out, "   {}", badges.join("  "));
        }
    }
    out.trim_end().to_string()
}
