use crate::adapters::stations::StationTable;
use crate::domain::model::EventParameters;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(EventParameters),
    NeedsInteractiveInput,
}

/// Resolves the positional arguments (program name excluded).
///
/// Accepted forms:
/// - `origin st_lat st_lon ev_lat ev_lon depth`
/// - `origin STATION ev_lat ev_lon depth`
///
/// Any other count, a bad number or an unknown station asks for interactive input.
pub fn resolve_arguments<S: AsRef<str>>(args: &[S], stations: &StationTable) -> Resolution {
    let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();

    let resolved = match *args.as_slice() {
        [origin, st_lat, st_lon, ev_lat, ev_lon, depth] => {
            resolve_explicit(origin, [st_lat, st_lon, ev_lat, ev_lon, depth])
        }
        [origin, station, ev_lat, ev_lon, depth] => {
            resolve_named(origin, station, [ev_lat, ev_lon, depth], stations)
        }
        _ => {
            tracing::debug!("Got {} positional arguments, expected 5 or 6", args.len());
            None
        }
    };

    match resolved {
        Some(params) => Resolution::Resolved(params),
        None => Resolution::NeedsInteractiveInput,
    }
}

fn resolve_explicit(origin: &str, values: [&str; 5]) -> Option<EventParameters> {
    let [station_latitude, station_longitude, event_latitude, event_longitude, depth_km] =
        parse_numbers(values)?;

    Some(EventParameters {
        origin_time: origin.to_string(),
        station_latitude,
        station_longitude,
        event_latitude,
        event_longitude,
        depth_km,
    })
}

fn resolve_named(
    origin: &str,
    station_arg: &str,
    values: [&str; 3],
    stations: &StationTable,
) -> Option<EventParameters> {
    let Some(station) = stations.lookup(station_arg) else {
        tracing::debug!("No station in the table matches '{}'", station_arg);
        return None;
    };
    tracing::debug!("Using station {} for '{}'", station.name, station_arg);

    let [event_latitude, event_longitude, depth_km] = parse_numbers(values)?;

    Some(EventParameters {
        origin_time: origin.to_string(),
        station_latitude: station.latitude,
        station_longitude: station.longitude,
        event_latitude,
        event_longitude,
        depth_km,
    })
}

fn parse_numbers<const N: usize>(values: [&str; N]) -> Option<[f64; N]> {
    let mut parsed = [0.0; N];
    for (slot, value) in parsed.iter_mut().zip(values) {
        match value.trim().parse::<f64>() {
            Ok(number) => *slot = number,
            Err(e) => {
                tracing::debug!("Could not parse '{}' as a number: {}", value, e);
                return None;
            }
        }
    }
    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Station;

    fn resolved(resolution: Resolution) -> EventParameters {
        match resolution {
            Resolution::Resolved(params) => params,
            Resolution::NeedsInteractiveInput => panic!("expected resolved parameters"),
        }
    }

    #[test]
    fn test_six_arguments() {
        let args = ["2015-11-30T09:49:13", "42.74695", "-84.39015", "36.737", "-98.006", "5.00"];
        let params = resolved(resolve_arguments(&args, &StationTable::builtin()));

        assert_eq!(params.origin_time, "2015-11-30T09:49:13");
        assert_eq!(params.station_latitude, 42.74695);
        assert_eq!(params.station_longitude, -84.39015);
        assert_eq!(params.event_latitude, 36.737);
        assert_eq!(params.event_longitude, -98.006);
        assert_eq!(params.depth_km, 5.0);
    }

    #[test]
    fn test_five_arguments_with_station_name() {
        let args = ["2015-11-30T09:49:13", "NHBP", "36.737", "-98.006", "5.00"];
        let params = resolved(resolve_arguments(&args, &StationTable::builtin()));

        assert_eq!(params.station_latitude, 42.097477);
        assert_eq!(params.station_longitude, -85.266003);
        assert_eq!(params.event_latitude, 36.737);
    }

    #[test]
    fn test_station_table_override_wins() {
        let table = StationTable::builtin().with_stations([Station::new("NHBP", 10.0, 20.0)]);
        let args = ["2015-11-30T09:49:13", "NHBP", "36.737", "-98.006", "5.00"];
        let params = resolved(resolve_arguments(&args, &table));

        assert_eq!(params.station_latitude, 10.0);
        assert_eq!(params.station_longitude, 20.0);
    }

    #[test]
    fn test_malformed_depth_needs_interactive_input() {
        let args = ["2015-11-30T09:49:13", "42.74695", "-84.39015", "36.737", "-98.006", "deep"];
        assert_eq!(
            resolve_arguments(&args, &StationTable::builtin()),
            Resolution::NeedsInteractiveInput
        );
    }

    #[test]
    fn test_unknown_station_needs_interactive_input() {
        let args = ["2015-11-30T09:49:13", "ANMO", "36.737", "-98.006", "5.00"];
        assert_eq!(
            resolve_arguments(&args, &StationTable::builtin()),
            Resolution::NeedsInteractiveInput
        );
    }

    #[test]
    fn test_malformed_number_with_station_needs_interactive_input() {
        let args = ["2015-11-30T09:49:13", "LNSM", "36.737", "west", "5.00"];
        assert_eq!(
            resolve_arguments(&args, &StationTable::builtin()),
            Resolution::NeedsInteractiveInput
        );
    }

    #[test]
    fn test_wrong_argument_count_needs_interactive_input() {
        let none: [&str; 0] = [];
        assert_eq!(
            resolve_arguments(&none, &StationTable::builtin()),
            Resolution::NeedsInteractiveInput
        );
        assert_eq!(
            resolve_arguments(&["2015-11-30T09:49:13", "NHBP"], &StationTable::builtin()),
            Resolution::NeedsInteractiveInput
        );
    }

    #[test]
    fn test_origin_time_is_not_validated_here() {
        let args = ["yesterday", "NHBP", "36.737", "-98.006", "5.00"];
        let params = resolved(resolve_arguments(&args, &StationTable::builtin()));
        assert_eq!(params.origin_time, "yesterday");
    }
}
