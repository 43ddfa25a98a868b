use classhelper::course::{Course, CourseTable};
use classhelper::preference::Preferences;
use classhelper::scheduler::Scheduler;
use classhelper::serilize::ScheduleList;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!("Commands:");
    println!("  ADD <subject> <number>");
    println!("  REMOVE <subject> <number>");
    println!("  CLEAR");
    println!("  FIND [subject]");
    println!("  SCHEDULE");
    println!("  JSON");
    println!("  EXIT");
}

// usage: scheduler [sections.csv] [preferences.toml]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let data = PathBuf::from(args.next().unwrap_or_else(|| "sections.csv".to_string()));
    let preferences = match args.next() {
        Some(path) => Preferences::load(path)?,
        None => Preferences::default(),
    };

    let table = CourseTable::load(data)?;
    println!("Preferred window: {}", preferences.window());

    let mut courses: Vec<Course> = Vec::new();
    loop {
        let names: Vec<String> = courses.iter().map(|c| c.to_string()).collect();
        println!("Current courses: {:?}", names);

        print!("> ");
        std::io::stdout().flush()?;
        let mut input = String::new();
        if std::io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim().to_uppercase();
        let input: Vec<&str> = input.split_whitespace().collect();

        if input.is_empty() {
            print_help();
            continue;
        }

        match input[0] {
            "ADD" | "+" if input.len() == 3 => {
                let course = Course::new(input[1], input[2]);
                if !courses.contains(&course) {
                    courses.push(course);
                }
            }
            "REMOVE" | "-" if input.len() == 3 => {
                let course = Course::new(input[1], input[2]);
                courses.retain(|c| *c != course);
            }
            "CLEAR" | "--" => {
                courses.clear();
            }
            "FIND" | "LS" => {
                let lazy = table.to_lazy();
                let found = match input.get(1) {
                    Some(subject) => lazy.subject(subject).collect()?,
                    None => lazy.collect()?,
                };
                println!("{}", found);
            }
            "SCHEDULE" | "S" | "JSON" => {
                let scheduler = Scheduler::new(table.catalog(&courses)?, preferences.clone());
                let outcome = scheduler.generate();

                for rejected in scheduler.catalog().rejected() {
                    println!("Skipped unreadable section {}", rejected);
                }
                if input[0] == "JSON" {
                    let list = ScheduleList::new(&outcome, scheduler.catalog());
                    println!("{}", list.to_json()?);
                } else {
                    println!("Found {} valid schedule(s).", outcome.len());
                    print!("{}", outcome);
                }
            }
            "EXIT" => {
                break;
            }
            _ => {
                println!("Invalid command");
                print_help();
            }
        }
    }

    Ok(())
}
