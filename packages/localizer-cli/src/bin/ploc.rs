/**
 * ploc - page localizer
 *
 * Localize HTML files from a translation strings file
 */
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::process;

use page_localizer_cli::batch::{list_active_languages, load_options, localize_files};

fn main() {
    let matches = Command::new("ploc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Page localizer (Rust implementation)")
        .arg(
            Arg::new("strings")
                .short('s')
                .long("strings")
                .value_name("PATH")
                .required(true)
                .help("Path to the strings JSON file"),
        )
        .arg(
            Arg::new("language")
                .short('l')
                .long("language")
                .value_name("CODE")
                .help("Language code to translate into"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .help("Directory for localized output (default: next to each input)"),
        )
        .arg(
            Arg::new("list-languages")
                .long("list-languages")
                .action(ArgAction::SetTrue)
                .help("List the languages every string is translated into, then exit"),
        )
        .arg(
            Arg::new("inputs")
                .value_name("FILE")
                .num_args(0..)
                .help("HTML files to localize"),
        )
        .get_matches();

    let strings_path = PathBuf::from(matches.get_one::<String>("strings").unwrap());
    let options = match load_options(&strings_path) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("Error: {error:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("list-languages") {
        match list_active_languages(&options) {
            Ok(listings) => {
                for listing in listings {
                    println!("{}\t{}", listing.code, listing.label);
                }
            }
            Err(error) => {
                eprintln!("Error: {error:#}");
                process::exit(1);
            }
        }
        return;
    }

    let Some(language) = matches.get_one::<String>("language") else {
        eprintln!("Error: --language is required unless --list-languages is given");
        process::exit(1);
    };

    let inputs: Vec<PathBuf> = matches
        .get_many::<String>("inputs")
        .into_iter()
        .flatten()
        .map(PathBuf::from)
        .collect();
    if inputs.is_empty() {
        eprintln!("Error: no input files given");
        process::exit(1);
    }

    let out_dir = matches.get_one::<String>("out-dir").map(PathBuf::from);

    match localize_files(&inputs, &options, language, out_dir.as_deref()) {
        Ok(outcomes) => {
            for outcome in outcomes {
                for warning in &outcome.warnings {
                    eprintln!("Warning: {}: {warning}", outcome.input.display());
                }
                println!(
                    "{} -> {} ({} nodes translated)",
                    outcome.input.display(),
                    outcome.output.display(),
                    outcome.translated_nodes
                );
            }
        }
        Err(error) => {
            eprintln!("Error: {error:#}");
            process::exit(1);
        }
    }
}
