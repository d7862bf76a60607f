//! Place every dataset record on a map as a styled marker
use crate::dataset::PointRecord;
use crate::services::{MapSurface, Marker};
use crate::style::StyleResolver;
use log::debug;

/// Add one marker per record in input order and return the number of markers added
pub fn plot_all_points(
    surface: &mut dyn MapSurface,
    resolver: &StyleResolver,
    points: &[PointRecord],
) -> usize {
    for point in points {
        let marker = Marker::new(point.location())
            .with_popup(point.description().to_string())
            .with_tooltip(point.name().to_string())
            .with_style(resolver.resolve(point.category()));
        surface.add_marker(marker);
    }
    debug!("Plotted {} points", points.len());
    points.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::Location;
    use crate::services::map::RecordingSurface;
    use crate::style::{MarkerStyle, DEFAULT_COLOR, DEFAULT_ICON};

    fn record(name: &str, lat: f64, lon: f64, category: &str, description: &str) -> PointRecord {
        PointRecord::new(
            name.to_string(),
            Location::new(lat, lon),
            category.to_string(),
            description.to_string(),
        )
    }

    #[test]
    fn one_marker_per_record_in_order() {
        let points = vec![
            record("Stadtpark", 53.5964, 10.0247, "Calisthenics", "Bars near the lake"),
            record("Kaifu", 53.5738, 9.9571, "Freibad", "Outdoor pool"),
            record("Kaifu", 53.5738, 9.9571, "Freibad", "Outdoor pool"),
        ];
        let mut surface = RecordingSurface::default();
        let count = plot_all_points(&mut surface, &StyleResolver::default(), &points);

        assert_eq!(count, 3);
        assert_eq!(surface.markers.len(), 3);
        let first = &surface.markers[0];
        assert_eq!(first.location(), Location::new(53.5964, 10.0247));
        assert_eq!(first.popup(), Some("Bars near the lake"));
        assert_eq!(first.tooltip(), Some("Stadtpark"));
        assert_eq!(
            first.style(),
            Some(&MarkerStyle::new("dumbbell".to_string(), "green".to_string()))
        );
        // duplicates are kept
        assert_eq!(surface.markers[1], surface.markers[2]);
        assert!(surface.polylines.is_empty());
        assert!(surface.bounds.is_empty());
    }

    #[test]
    fn unknown_categories_use_default_style() {
        let points = vec![record("Somewhere", 1.0, 2.0, "Curling", "")];
        let mut surface = RecordingSurface::default();
        plot_all_points(&mut surface, &StyleResolver::default(), &points);

        let style = surface.markers[0].style().unwrap();
        assert_eq!(style.icon(), DEFAULT_ICON);
        assert_eq!(style.color(), DEFAULT_COLOR);
    }

    #[test]
    fn nothing_to_plot() {
        let mut surface = RecordingSurface::default();
        assert_eq!(plot_all_points(&mut surface, &StyleResolver::default(), &[]), 0);
        assert!(surface.markers.is_empty());
    }
}
