//! Draw a directions route and fit the map view around it
use crate::gps::{BoundingBox, Location};
use crate::services::{MapSurface, Marker, Polyline};
use crate::Error;
use log::debug;

/// Line weight of a drawn route
pub const ROUTE_WEIGHT: u32 = 5;
/// Line opacity of a drawn route
pub const ROUTE_OPACITY: f32 = 1.0;

/// Draw start and destination markers plus a line through the route, then fit the view.
///
/// `geometry` holds `[longitude, latitude]` pairs as returned by a directions service. The
/// fitted bounding box is returned. A route with a single point has a degenerate box and
/// gets one marker since start and destination coincide.
pub fn render_route(
    surface: &mut dyn MapSurface,
    geometry: &[[f64; 2]],
) -> Result<BoundingBox, Error> {
    let route: Vec<Location> = geometry.iter().map(|p| Location::from_lon_lat(*p)).collect();
    let bbox = BoundingBox::from_locations(&route).ok_or(Error::EmptyRoute)?;

    // from_locations only fails on an empty route so both ends exist here
    let (start, destination) = match (route.first(), route.last()) {
        (Some(start), Some(destination)) => (*start, *destination),
        _ => return Err(Error::EmptyRoute),
    };
    surface.add_marker(Marker::new(start).with_tooltip("Start".to_string()));
    if route.len() > 1 {
        surface.add_marker(Marker::new(destination).with_tooltip("Destination".to_string()));
    }

    debug!("Drawing route with {} points", route.len());
    surface.add_polyline(Polyline::new(route, ROUTE_WEIGHT, ROUTE_OPACITY));
    surface.fit_bounds(bbox);
    Ok(bbox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::map::RecordingSurface;

    #[test]
    fn route_is_drawn_and_fitted() {
        let geometry = [[10.0, 50.0], [10.5, 50.2], [11.0, 50.5]];
        let mut surface = RecordingSurface::default();
        let bbox = render_route(&mut surface, &geometry).unwrap();

        assert_eq!(bbox.southwest(), Location::new(50.0, 10.0));
        assert_eq!(bbox.northeast(), Location::new(50.5, 11.0));
        assert_eq!(surface.bounds, vec![bbox]);

        assert_eq!(surface.markers.len(), 2);
        assert_eq!(surface.markers[0].location(), Location::new(50.0, 10.0));
        assert_eq!(surface.markers[0].tooltip(), Some("Start"));
        assert_eq!(surface.markers[1].location(), Location::new(50.5, 11.0));
        assert_eq!(surface.markers[1].tooltip(), Some("Destination"));

        assert_eq!(surface.polylines.len(), 1);
        let line = &surface.polylines[0];
        assert_eq!(line.weight(), 5);
        assert_eq!(line.opacity(), 1.0);
        assert_eq!(
            line.points(),
            &[
                Location::new(50.0, 10.0),
                Location::new(50.2, 10.5),
                Location::new(50.5, 11.0)
            ]
        );
    }

    #[test]
    fn single_point_route_has_degenerate_bounds() {
        let mut surface = RecordingSurface::default();
        let bbox = render_route(&mut surface, &[[9.9, 53.5]]).unwrap();
        assert_eq!(bbox.southwest(), bbox.northeast());
        assert_eq!(bbox.southwest(), Location::new(53.5, 9.9));
        assert_eq!(surface.markers.len(), 1);
        assert_eq!(surface.polylines[0].points().len(), 1);
    }

    #[test]
    fn empty_route_draws_nothing() {
        let mut surface = RecordingSurface::default();
        assert!(matches!(
            render_route(&mut surface, &[]),
            Err(Error::EmptyRoute)
        ));
        assert!(surface.markers.is_empty());
        assert!(surface.polylines.is_empty());
        assert!(surface.bounds.is_empty());
    }

    #[test]
    fn bounds_cover_points_between_the_ends() {
        // the middle point sticks out past both ends
        let geometry = [[0.0, 0.0], [-3.0, 4.0], [1.0, 1.0]];
        let mut surface = RecordingSurface::default();
        let bbox = render_route(&mut surface, &geometry).unwrap();
        assert_eq!(bbox.southwest(), Location::new(0.0, -3.0));
        assert_eq!(bbox.northeast(), Location::new(4.0, 1.0));
    }
}
