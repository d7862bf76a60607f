//! Resolve the marker icon and color used for a sport category
use serde::Serialize;
use std::collections::BTreeMap;

/// Icon used for categories missing from the icon table
pub static DEFAULT_ICON: &str = "location-dot";
/// Color used for categories missing from the color table
pub static DEFAULT_COLOR: &str = "red";

static BUILTIN_ICONS: &[(&str, &str)] = &[
    ("Calisthenics", "dumbbell"),
    ("Beach-Volleyball", "volleyball"),
    ("Table-Tennis", "table-tennis-paddle-ball"),
    ("Climbing", "mountain"),
];

static BUILTIN_COLORS: &[(&str, &str)] = &[
    ("Freibad", "darkred"),
    ("Hallenbad", "darkblue"),
    ("Calisthenics", "green"),
    ("Boxen", "gray"),
];

/// Font Awesome icon name and marker color for a single marker
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MarkerStyle {
    icon: String,
    color: String,
}

impl MarkerStyle {
    pub fn new(icon: String, color: String) -> Self {
        MarkerStyle { icon, color }
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Lookup tables from category to icon and from category to color.
///
/// The two tables are independent and do not need to share keys, a category only found in
/// one of them gets the default for the other.
#[derive(Clone, Debug)]
pub struct StyleResolver {
    icons: BTreeMap<String, String>,
    colors: BTreeMap<String, String>,
}

impl StyleResolver {
    pub fn new(icons: BTreeMap<String, String>, colors: BTreeMap<String, String>) -> Self {
        StyleResolver { icons, colors }
    }

    /// Add entries to (or replace entries in) the icon table
    pub fn extend_icons<I: IntoIterator<Item = (String, String)>>(&mut self, entries: I) {
        self.icons.extend(entries);
    }

    /// Add entries to (or replace entries in) the color table
    pub fn extend_colors<I: IntoIterator<Item = (String, String)>>(&mut self, entries: I) {
        self.colors.extend(entries);
    }

    pub fn icon(&self, category: &str) -> Option<&str> {
        self.icons.get(category).map(String::as_str)
    }

    pub fn color(&self, category: &str) -> Option<&str> {
        self.colors.get(category).map(String::as_str)
    }

    pub fn resolve_icon(&self, category: &str) -> &str {
        self.icon(category).unwrap_or(DEFAULT_ICON)
    }

    pub fn resolve_color(&self, category: &str) -> &str {
        self.color(category).unwrap_or(DEFAULT_COLOR)
    }

    pub fn resolve(&self, category: &str) -> MarkerStyle {
        MarkerStyle::new(
            self.resolve_icon(category).to_string(),
            self.resolve_color(category).to_string(),
        )
    }

    /// Categories that only appear in one of the two tables
    pub fn unpaired_categories(&self) -> Vec<&str> {
        let only_icons = self.icons.keys().filter(|k| !self.colors.contains_key(*k));
        let only_colors = self.colors.keys().filter(|k| !self.icons.contains_key(*k));
        let mut unpaired: Vec<&str> = only_icons.chain(only_colors).map(String::as_str).collect();
        unpaired.sort_unstable();
        unpaired
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        let table = |entries: &[(&str, &str)]| {
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        StyleResolver {
            icons: table(BUILTIN_ICONS),
            colors: table(BUILTIN_COLORS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_categories_resolve_to_their_values() {
        let resolver = StyleResolver::default();
        for (category, icon) in BUILTIN_ICONS {
            assert_eq!(resolver.resolve_icon(category), *icon);
        }
        for (category, color) in BUILTIN_COLORS {
            assert_eq!(resolver.resolve_color(category), *color);
        }
    }

    #[test]
    fn unknown_categories_fall_back_to_defaults() {
        let resolver = StyleResolver::default();
        for category in &["Skateboarding", "", "calisthenics"] {
            assert_eq!(resolver.resolve_icon(category), "location-dot");
            assert_eq!(resolver.resolve_color(category), "red");
        }
    }

    #[test]
    fn tables_are_independent() {
        let resolver = StyleResolver::default();
        // has an icon but no color
        let style = resolver.resolve("Climbing");
        assert_eq!(style.icon(), "mountain");
        assert_eq!(style.color(), DEFAULT_COLOR);
        // has a color but no icon
        let style = resolver.resolve("Freibad");
        assert_eq!(style.icon(), DEFAULT_ICON);
        assert_eq!(style.color(), "darkred");
    }

    #[test]
    fn resolving_is_idempotent() {
        let resolver = StyleResolver::default();
        let first = resolver.resolve("Calisthenics");
        let second = resolver.resolve("Calisthenics");
        assert_eq!(first, second);
        assert_eq!(first, MarkerStyle::new("dumbbell".into(), "green".into()));
        assert_eq!(resolver.resolve("Nope"), resolver.resolve("Nope"));
    }

    #[test]
    fn unpaired_categories_are_reported() {
        let resolver = StyleResolver::default();
        assert_eq!(
            resolver.unpaired_categories(),
            vec![
                "Beach-Volleyball",
                "Boxen",
                "Climbing",
                "Freibad",
                "Hallenbad",
                "Table-Tennis"
            ]
        );
    }

    #[test]
    fn extending_overrides_builtin_entries() {
        let mut resolver = StyleResolver::default();
        resolver.extend_icons(vec![("Boxen".to_string(), "hand-fist".to_string())]);
        resolver.extend_colors(vec![("Calisthenics".to_string(), "orange".to_string())]);
        assert_eq!(resolver.resolve_icon("Boxen"), "hand-fist");
        assert_eq!(resolver.resolve_color("Calisthenics"), "orange");
        assert!(!resolver.unpaired_categories().contains(&"Boxen"));
    }
}
