//! Interactive prompts for picking the start and destination of a route
use crate::dataset::PointRecord;
use crate::gps::Location;
use crate::Error;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Ask for a latitude and a longitude, re-prompting until both parse.
///
/// `label` names the location in the messages, e.g. "starting".
pub fn prompt_location<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<Location, Error> {
    writeln!(output, "Please enter your {} coordinates here:", label)?;
    let latitude = prompt_value(input, output, "Enter latitude: ", |v: &f64| {
        Location::is_valid_latitude(*v)
    })?;
    let longitude = prompt_value(input, output, "Enter longitude: ", |v: &f64| {
        Location::is_valid_longitude(*v)
    })?;
    let location = Location::new(latitude, longitude);
    writeln!(output, "Your {} coordinates: {}", label, location)?;
    Ok(location)
}

/// List the points by index and ask which one to use as the destination
pub fn prompt_destination<'a, R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    points: &'a [PointRecord],
) -> Result<&'a PointRecord, Error> {
    if points.is_empty() {
        return Err(Error::Other(
            "there are no points to choose a destination from".to_string(),
        ));
    }
    writeln!(output, "Please choose your destination point:")?;
    for (idx, point) in points.iter().enumerate() {
        writeln!(output, "{} {}", idx, point.name())?;
    }
    let idx = prompt_value(input, output, "Enter number: ", |v: &usize| *v < points.len())?;
    let point = &points[idx];
    writeln!(
        output,
        "Your destination point coordinates: {}",
        point.location()
    )?;
    Ok(point)
}

/// Read lines until one parses into a value accepted by `valid`
fn prompt_value<T, R, W, F>(input: &mut R, output: &mut W, prompt: &str, valid: F) -> Result<T, Error>
where
    T: FromStr,
    R: BufRead,
    W: Write,
    F: Fn(&T) -> bool,
{
    let mut line = String::new();
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before a value was entered",
            )));
        }
        match line.trim().parse::<T>() {
            Ok(val) if valid(&val) => return Ok(val),
            _ => writeln!(output, "Invalid value: '{}', please try again", line.trim())?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<PointRecord> {
        vec![
            PointRecord::new(
                "Stadtpark".to_string(),
                Location::new(53.5964, 10.0247),
                "Calisthenics".to_string(),
                String::new(),
            ),
            PointRecord::new(
                "Kaifu-Bad".to_string(),
                Location::new(53.5738, 9.9571),
                "Freibad".to_string(),
                String::new(),
            ),
        ]
    }

    #[test]
    fn location_is_read_latitude_first() {
        let mut input = "53.55\n9.99\n".as_bytes();
        let mut output = Vec::new();
        let loc = prompt_location(&mut input, &mut output, "starting").unwrap();
        assert_eq!(loc, Location::new(53.55, 9.99));

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Enter latitude: "));
        assert!(text.contains("Enter longitude: "));
        assert!(text.contains("Your starting coordinates: [53.55, 9.99]"));
    }

    #[test]
    fn bad_coordinates_are_asked_again() {
        let mut input = "north\n95\n 53.55 \nNaN\n9.99\n".as_bytes();
        let mut output = Vec::new();
        let loc = prompt_location(&mut input, &mut output, "starting").unwrap();
        assert_eq!(loc, Location::new(53.55, 9.99));

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid value").count(), 3);
        assert_eq!(text.matches("Enter latitude: ").count(), 3);
    }

    #[test]
    fn location_prompt_fails_at_end_of_input() {
        let mut input = "53.55\n".as_bytes();
        let mut output = Vec::new();
        assert!(matches!(
            prompt_location(&mut input, &mut output, "starting"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn destination_is_chosen_by_index() {
        let points = points();
        let mut input = "1\n".as_bytes();
        let mut output = Vec::new();
        let dest = prompt_destination(&mut input, &mut output, &points).unwrap();
        assert_eq!(dest.name(), "Kaifu-Bad");

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("0 Stadtpark\n1 Kaifu-Bad\n"));
        assert!(text.contains("Your destination point coordinates: [53.5738, 9.9571]"));
    }

    #[test]
    fn out_of_range_index_is_asked_again() {
        let points = points();
        let mut input = "2\n-1\nfirst\n0\n".as_bytes();
        let mut output = Vec::new();
        let dest = prompt_destination(&mut input, &mut output, &points).unwrap();
        assert_eq!(dest.name(), "Stadtpark");
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid value").count(), 3);
    }

    #[test]
    fn destination_needs_points() {
        let mut input = "0\n".as_bytes();
        let mut output = Vec::new();
        assert!(prompt_destination(&mut input, &mut output, &[]).is_err());
        assert!(output.is_empty());
    }
}
