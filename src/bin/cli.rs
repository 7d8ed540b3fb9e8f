use std::io::{self, Write};

use chrono::NaiveDate;
use temporal_tool::{
    config, DateValue, DurationValue, HolidayCalendar, SystemClock, TimeUnit,
};

fn parse_unit(input: &str) -> Option<TimeUnit> {
    let unit = TimeUnit::parse(input);
    if unit.is_none() {
        println!("Invalid unit '{input}' (years|months|weeks|days|hours|minutes|seconds|milliseconds)");
    }
    unit
}

fn parse_duration_json(input: &str) -> Option<DurationValue> {
    let value = match serde_json::from_str::<serde_json::Value>(input) {
        Ok(value) => value,
        Err(e) => {
            println!("Invalid JSON: {e}");
            return None;
        }
    };
    let duration = DurationValue::from_json(&value);
    match duration.invalid_kind() {
        None => Some(duration),
        Some(kind) => {
            println!("Invalid duration input ({kind})");
            None
        }
    }
}

fn describe(value: &DateValue) -> String {
    match (value.to_iso(), value.format_default()) {
        (Ok(iso), Ok(display)) => format!("{iso}  ({display})"),
        _ => match value.invalid_kind() {
            Some(kind) => format!("invalid ({kind})"),
            None => "invalid".to_string(),
        },
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                                Show this help\n  now                                 Current instant\n  parse <iso>                         Parse an ISO-8601 string\n  pat <value> <pattern...>            Parse against a token pattern\n  fmt <iso> <pattern...>              Format with a token pattern\n  diff <a> <b> <unit> [exact]         Signed difference a - b\n  same <a> <b> <unit>                 Same calendar bucket at unit\n  add <iso> <units_json>              Calendar addition (e.g. {{\"days\":1}})\n  sub <iso> <units_json>              Calendar subtraction\n  startof <iso> <unit>                First instant of the unit\n  endof <iso> <unit>                  Last millisecond of the unit\n  holiday <iso>                       Check against the loaded calendar\n  workday <YYYY-MM-DD>                Working-day check + next working day\n  dur <units_json>                    Duration view (format + hours)\n  duradd <json_a> <json_b>            Sum two durations\n  cal french <start_year> <end_year>  Rebuild the French calendar\n  cal load json|csv <path>            Load the holiday calendar\n  cal save json|csv <path>            Save the holiday calendar\n  quit|exit                           Exit"
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let clock = SystemClock;
    let mut calendar = HolidayCalendar::default();

    println!("Temporal Tool (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => {
                print_help();
            }
            "quit" | "exit" => break,
            "now" => {
                println!("{}", describe(&DateValue::now(&clock)));
            }
            "parse" => match parts.next() {
                Some(raw) => {
                    let value = DateValue::from_iso(raw);
                    match value.invalid_kind() {
                        None => println!("{}", describe(&value)),
                        Some(kind) => println!("Invalid date input ({kind})"),
                    }
                }
                None => println!("Usage: parse <iso>"),
            },
            "pat" => {
                let raw = parts.next();
                let pattern: Vec<&str> = parts.collect();
                match (raw, !pattern.is_empty()) {
                    (Some(raw), true) => {
                        let value = DateValue::from_pattern(raw, &pattern.join(" "));
                        match value.invalid_kind() {
                            None => println!("{}", describe(&value)),
                            Some(kind) => println!("Invalid date input ({kind})"),
                        }
                    }
                    _ => println!("Usage: pat <value> <pattern...>"),
                }
            }
            "fmt" => {
                let raw = parts.next();
                let pattern: Vec<&str> = parts.collect();
                match (raw, !pattern.is_empty()) {
                    (Some(raw), true) => {
                        match DateValue::from_iso(raw).format(&pattern.join(" ")) {
                            Ok(rendered) => println!("{rendered}"),
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    _ => println!("Usage: fmt <iso> <pattern...>"),
                }
            }
            "diff" => {
                let a = parts.next();
                let b = parts.next();
                let unit_s = parts.next();
                let exact = parts.next() == Some("exact");
                match (a, b, unit_s) {
                    (Some(a), Some(b), Some(unit_s)) => {
                        let Some(unit) = parse_unit(unit_s) else { continue };
                        let value = DateValue::from_iso(a);
                        if exact {
                            match value.diff_exact(b, unit) {
                                Ok(result) => println!("{result}"),
                                Err(e) => println!("Error: {e}"),
                            }
                        } else {
                            match value.diff(b, unit) {
                                Ok(result) => println!("{result}"),
                                Err(e) => println!("Error: {e}"),
                            }
                        }
                    }
                    _ => println!("Usage: diff <a> <b> <unit> [exact]"),
                }
            }
            "same" => {
                let a = parts.next();
                let b = parts.next();
                let unit_s = parts.next();
                match (a, b, unit_s) {
                    (Some(a), Some(b), Some(unit_s)) => {
                        let Some(unit) = parse_unit(unit_s) else { continue };
                        match DateValue::from_iso(a).is_same(b, unit) {
                            Ok(result) => println!("{result}"),
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    _ => println!("Usage: same <a> <b> <unit>"),
                }
            }
            "add" | "sub" => {
                let raw = parts.next();
                let json = parts.next();
                match (raw, json) {
                    (Some(raw), Some(json)) => {
                        let Some(span) = parse_duration_json(json) else { continue };
                        let value = DateValue::from_iso(raw);
                        let shifted = if cmd == "add" {
                            value.add(&span)
                        } else {
                            value.subtract(&span)
                        };
                        println!("{}", describe(&shifted));
                    }
                    _ => println!("Usage: {cmd} <iso> <units_json>"),
                }
            }
            "startof" | "endof" => {
                let raw = parts.next();
                let unit_s = parts.next();
                match (raw, unit_s) {
                    (Some(raw), Some(unit_s)) => {
                        let Some(unit) = parse_unit(unit_s) else { continue };
                        let value = DateValue::from_iso(raw);
                        let aligned = if cmd == "startof" {
                            value.start_of(unit)
                        } else {
                            value.end_of(unit)
                        };
                        println!("{}", describe(&aligned));
                    }
                    _ => println!("Usage: {cmd} <iso> <unit>"),
                }
            }
            "holiday" => match parts.next() {
                Some(raw) => match DateValue::from_iso(raw).is_holiday(&calendar) {
                    Ok(result) => println!("{result}"),
                    Err(e) => println!("Error: {e}"),
                },
                None => println!("Usage: holiday <iso>"),
            },
            "workday" => match parts.next() {
                Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    Ok(date) => println!(
                        "working: {}, next working day: {}",
                        calendar.is_working_day(date),
                        calendar.next_working_day(date)
                    ),
                    Err(_) => println!("Invalid date (YYYY-MM-DD)"),
                },
                None => println!("Usage: workday <YYYY-MM-DD>"),
            },
            "dur" => match parts.next() {
                Some(json) => {
                    let Some(duration) = parse_duration_json(json) else { continue };
                    match (duration.format(), duration.as_hours()) {
                        (Ok(rendered), Ok(hours)) => println!("{rendered}  ({hours} hours)"),
                        (Err(e), _) | (_, Err(e)) => println!("Error: {e}"),
                    }
                }
                None => println!("Usage: dur <units_json>"),
            },
            "duradd" => {
                let a = parts.next();
                let b = parts.next();
                match (a, b) {
                    (Some(a), Some(b)) => {
                        let Some(first) = parse_duration_json(a) else { continue };
                        let Some(second) = parse_duration_json(b) else { continue };
                        match first.add(&second).format() {
                            Ok(rendered) => println!("{rendered}"),
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    _ => println!("Usage: duradd <json_a> <json_b>"),
                }
            }
            "cal" => {
                let sub = parts.next();
                match sub {
                    Some("french") => {
                        let start = parts.next().and_then(|s| s.parse::<i32>().ok());
                        let end = parts.next().and_then(|s| s.parse::<i32>().ok());
                        match (start, end) {
                            (Some(start), Some(end)) => {
                                calendar = HolidayCalendar::french(start, end);
                                println!("Calendar rebuilt for {start}-{end}.");
                            }
                            _ => println!("Usage: cal french <start_year> <end_year>"),
                        }
                    }
                    Some("load") | Some("save") => {
                        let format = parts.next();
                        let path = parts.next();
                        match (format, path) {
                            (Some(format @ ("json" | "csv")), Some(path)) => {
                                let result = match (sub, format) {
                                    (Some("load"), "json") => config::load_calendar_from_json(path)
                                        .map(|loaded| calendar = loaded),
                                    (Some("load"), "csv") => config::load_calendar_from_csv(path)
                                        .map(|loaded| calendar = loaded),
                                    (Some("save"), "json") => {
                                        config::save_calendar_to_json(&calendar, path)
                                    }
                                    _ => config::save_calendar_to_csv(&calendar, path),
                                };
                                match result {
                                    Ok(()) if sub == Some("load") => {
                                        println!("Calendar loaded from {path}.")
                                    }
                                    Ok(()) => println!("Calendar saved to {path}."),
                                    Err(e) => println!("Error: {e}"),
                                }
                            }
                            _ => println!("Usage: cal {} json|csv <path>", sub.unwrap_or("load")),
                        }
                    }
                    _ => println!("Usage: cal french|load|save ..."),
                }
            }
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
