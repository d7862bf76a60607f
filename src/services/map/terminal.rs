//! Use the tui crate to preview the map directly on the terminal
use super::{MapSurface, Marker, Polyline};
use crate::config::FromServiceConfig;
use crate::gps::{BoundingBox, Location};
use crossterm::cursor::Show;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::debug;
use std::io;
use tui::backend::{Backend, CrosstermBackend};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::widgets::canvas::{Canvas, Line, Map, MapResolution, Points};
use tui::widgets::{Block, Borders, Widget};
use tui::Terminal;

/// Defines parameters for drawing the map on a tui canvas
#[derive(Debug, FromServiceConfig)]
pub struct TerminalMap {
    title: String,
    /// degrees added around the fitted bounds
    margin: f64,
    high_resolution: bool,
    show_labels: bool,
    #[service_config(skip)]
    markers: Vec<Marker>,
    #[service_config(skip)]
    polylines: Vec<Polyline>,
    #[service_config(skip)]
    bounds: Option<BoundingBox>,
}

impl TerminalMap {
    fn view_bounds(&self) -> Option<BoundingBox> {
        self.bounds.or_else(|| {
            let locations: Vec<Location> = self.markers.iter().map(|m| m.location()).collect();
            BoundingBox::from_locations(&locations)
        })
    }

    fn show_on_screen(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        self.draw(&mut terminal)?;
        wait_for_key()
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let (x_bounds, y_bounds) = canvas_bounds(self.view_bounds(), self.margin);
        let resolution = if self.high_resolution {
            MapResolution::High
        } else {
            MapResolution::Low
        };

        terminal.draw(|f| {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(self.title.as_str());
            let area = f.size();
            let inner = block.inner(area);
            let canvas = Canvas::default()
                .block(block)
                .x_bounds(x_bounds)
                .y_bounds(y_bounds)
                .paint(|ctx| {
                    ctx.draw(&Map {
                        color: Color::DarkGray,
                        resolution,
                    });
                    ctx.layer();
                    for line in &self.polylines {
                        for pair in line.points().windows(2) {
                            ctx.draw(&Line {
                                x1: pair[0].longitude(),
                                y1: pair[0].latitude(),
                                x2: pair[1].longitude(),
                                y2: pair[1].latitude(),
                                color: Color::LightBlue,
                            });
                        }
                    }
                    ctx.layer();
                    for marker in &self.markers {
                        let loc = marker.location();
                        ctx.draw(&Points {
                            coords: &[(loc.longitude(), loc.latitude())],
                            color: marker_color(marker),
                        });
                    }
                });
            f.render_widget(canvas, area);

            if self.show_labels {
                let labels = MarkerLabels {
                    markers: &self.markers,
                    x_bounds,
                    y_bounds,
                };
                f.render_widget(labels, inner);
            }
        })
    }
}

impl Default for TerminalMap {
    fn default() -> Self {
        TerminalMap {
            title: "Sport map (press any key to exit)".to_string(),
            margin: 0.01,
            high_resolution: true,
            show_labels: true,
            markers: Vec::new(),
            polylines: Vec::new(),
            bounds: None,
        }
    }
}

impl MapSurface for TerminalMap {
    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn add_polyline(&mut self, line: Polyline) {
        self.polylines.push(line);
    }

    fn fit_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = Some(bounds);
    }

    fn render(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        debug!(
            "Drawing terminal map with {} markers and {} lines",
            self.markers.len(),
            self.polylines.len()
        );
        enable_raw_mode()?;
        run_then_restore(|| self.show_on_screen(), restore_terminal)?;

        // we draw to the terminal so there isn't anything to return
        Ok(Vec::new())
    }
}

/// Run `show` then `restore`, restoring even when `show` fails. The first error is returned.
fn run_then_restore<S, R>(show: S, restore: R) -> Result<(), Box<dyn std::error::Error>>
where
    S: FnOnce() -> Result<(), Box<dyn std::error::Error>>,
    R: FnOnce() -> Result<(), Box<dyn std::error::Error>>,
{
    let result = show();
    let restored = restore();
    result?;
    restored
}

fn restore_terminal() -> Result<(), Box<dyn std::error::Error>> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen, Show)?;
    Ok(())
}

fn wait_for_key() -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if let Event::Key(_) = event::read()? {
            return Ok(());
        }
    }
}

/// Marker tooltips written over the canvas, placed the same way the canvas places its points
struct MarkerLabels<'a> {
    markers: &'a [Marker],
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl Widget for MarkerLabels<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for marker in self.markers {
            let label = match marker.tooltip() {
                Some(label) => label,
                None => continue,
            };
            let loc = marker.location();
            if let Some((x, y)) = label_cell(
                area,
                self.x_bounds,
                self.y_bounds,
                loc.longitude(),
                loc.latitude(),
            ) {
                let width = usize::from(area.right() - x);
                buf.set_stringn(x, y, label, width, Style::default().fg(marker_color(marker)));
            }
        }
    }
}

/// Terminal cell of a canvas coordinate, `None` when it lies outside the bounds
fn label_cell(
    area: Rect,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x: f64,
    y: f64,
) -> Option<(u16, u16)> {
    let [left, right] = x_bounds;
    let [bottom, top] = y_bounds;
    if area.width == 0 || area.height == 0 || right <= left || top <= bottom {
        return None;
    }
    if x < left || x > right || y < bottom || y > top {
        return None;
    }
    let col = ((x - left) * f64::from(area.width - 1) / (right - left)) as u16;
    let row = ((top - y) * f64::from(area.height - 1) / (top - bottom)) as u16;
    Some((area.left() + col, area.top() + row))
}

fn marker_color(marker: &Marker) -> Color {
    marker
        .style()
        .map_or(Color::Red, |s| terminal_color(s.color()))
}

/// Canvas x (longitude) and y (latitude) ranges, the whole world when there is nothing to fit
fn canvas_bounds(bounds: Option<BoundingBox>, margin: f64) -> ([f64; 2], [f64; 2]) {
    match bounds {
        Some(bbox) => {
            let bbox = bbox.padded(margin);
            let (sw, ne) = (bbox.southwest(), bbox.northeast());
            (
                [sw.longitude().max(-180.0), ne.longitude().min(180.0)],
                [sw.latitude().max(-90.0), ne.latitude().min(90.0)],
            )
        }
        None => ([-180.0, 180.0], [-90.0, 90.0]),
    }
}

/// Closest terminal color to a marker color name
fn terminal_color(name: &str) -> Color {
    match name {
        "red" | "darkred" => Color::Red,
        "lightred" | "pink" => Color::LightRed,
        "orange" | "beige" => Color::Yellow,
        "green" | "darkgreen" => Color::Green,
        "lightgreen" => Color::LightGreen,
        "blue" | "darkblue" => Color::Blue,
        "lightblue" => Color::LightBlue,
        "cadetblue" => Color::Cyan,
        "purple" | "darkpurple" => Color::Magenta,
        "white" => Color::White,
        "gray" | "lightgray" => Color::Gray,
        "black" => Color::DarkGray,
        _ => Color::Red,
    }
}
