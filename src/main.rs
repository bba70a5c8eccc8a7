use std::error::Error;
use std::io::Read;
use std::path::Path;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use colored::*;

mod analysis;
mod clickjack;
mod constants;
mod error;
mod helpers;
mod jwt_core;
mod replay;
mod scans;
mod types;

use analysis::HeaderAnalyzer;
use error::ReplayError;
use helpers::print_output;
use jwt_core::jwt_attacker::JwtAttacker;
use jwt_core::{codec, locator};
use replay::{HttpReplayer, Replay};
use scans::{common_files, wayback};
use types::{ReplayOptions, WaybackEvent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let matches = App::new("rusty_replay")
        .version("1.0")
        .about("Replays raw HTTP requests and mounts JWT forgery attacks")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(with_request_args(
            SubCommand::with_name("locate").about("Find JWT candidates in a raw request"),
        ))
        .subcommand(
            SubCommand::with_name("decode")
                .about("Decode a token's header and payload")
                .arg(Arg::with_name("token").required(true).index(1)),
        )
        .subcommand(
            SubCommand::with_name("edit")
                .about("Re-encode an edited decoded form, optionally re-signing")
                .arg(
                    Arg::with_name("decoded-file")
                        .long("decoded-file")
                        .short("d")
                        .takes_value(true)
                        .help("File with the edited Header:/Payload: text (stdin when omitted)"),
                )
                .arg(
                    Arg::with_name("secret")
                        .long("secret")
                        .short("s")
                        .takes_value(true)
                        .help("Re-sign with this secret using the header's algorithm"),
                ),
        )
        .subcommand(with_request_args(
            SubCommand::with_name("replay")
                .about("Send a raw request and print the response plus any decoded tokens"),
        ))
        .subcommand(with_request_args(
            SubCommand::with_name("attack")
                .about("Run a JWT attack strategy against the token in a raw request")
                .arg(
                    Arg::with_name("type")
                        .required(true)
                        .index(1)
                        .possible_values(&[
                            "unverified-sig",
                            "none-sig",
                            "kid-traversal",
                            "jwk-injection",
                            "algorithm-confusion",
                            "brute-force",
                        ]),
                )
                .arg(Arg::with_name("token").required(true).index(2))
                .arg(
                    Arg::with_name("wordlist")
                        .long("wordlist")
                        .short("w")
                        .takes_value(true)
                        .required_if("type", "brute-force")
                        .help("Wordlist file for the brute-force strategy"),
                )
                .arg(format_arg()),
        ))
        .subcommand(
            SubCommand::with_name("crack")
                .about("In-process dictionary check against common JWT secrets")
                .arg(Arg::with_name("token").required(true).index(1))
                .arg(
                    Arg::with_name("wordlist")
                        .long("wordlist")
                        .short("w")
                        .takes_value(true)
                        .help("Wordlist file (built-in common secrets when omitted)"),
                ),
        )
        .subcommand(with_request_args(
            SubCommand::with_name("common-files")
                .about("Probe the target for common sensitive files"),
        ))
        .subcommand(
            SubCommand::with_name("wayback")
                .about("Search the Wayback Machine for archived URLs")
                .arg(Arg::with_name("url").required(true).index(1)),
        )
        .subcommand(
            SubCommand::with_name("headers")
                .about("Annotate request/response headers from the embedded database")
                .arg(request_file_arg())
                .arg(format_arg()),
        )
        .subcommand(
            SubCommand::with_name("clickjack")
                .about("Generate a clickjacking PoC page for a URL")
                .arg(Arg::with_name("url").required(true).index(1)),
        )
        .get_matches();

    match matches.subcommand() {
        ("locate", Some(sub)) => {
            let request_text = read_request_text(sub)?;
            print_output::print_tokens(&locator::locate_tokens(&request_text));
        }
        ("decode", Some(sub)) => {
            match codec::decode_token(sub.value_of("token").unwrap()) {
                Ok(decoded) => println!("{}", decoded),
                Err(err) => print_output::print_error(&err),
            }
        }
        ("edit", Some(sub)) => {
            let decoded_text = match sub.value_of("decoded-file") {
                Some(path) => std::fs::read_to_string(path)?,
                None => read_stdin()?,
            };
            let secret = sub.value_of("secret").unwrap_or("");
            match codec::edit_token(&decoded_text, !secret.is_empty(), secret) {
                Ok(token) => println!("{}", token.bright_blue()),
                Err(err) => print_output::print_error(&err),
            }
        }
        ("replay", Some(sub)) => {
            let request_text = read_request_text(sub)?;
            let options = replay_options(sub);
            match HttpReplayer.replay(&request_text, &options).await {
                Ok(response) => {
                    println!("{}", response);
                    for (index, token) in locator::locate_tokens(&request_text).iter().enumerate() {
                        match codec::decode_token(token) {
                            Ok(decoded) => println!(
                                "\n{}\n{}",
                                format!("JWT #{}:", index + 1).cyan().bold(),
                                decoded
                            ),
                            Err(err) => print_output::print_error(&err),
                        }
                    }
                }
                Err(err) => print_output::print_error(&err),
            }
        }
        ("attack", Some(sub)) => {
            let token = sub.value_of("token").unwrap();
            let format = sub.value_of("format").unwrap();
            let attacker = JwtAttacker::new(HttpReplayer);
            match sub.value_of("type").unwrap() {
                "unverified-sig" => {
                    let request_text = read_request_text(sub)?;
                    let options = replay_options(sub);
                    match attacker
                        .unverified_signature(token, &request_text, &options)
                        .await
                    {
                        Ok(outcome) => print_output::print_tamper(&outcome, format),
                        Err(err) => print_output::print_error(&err),
                    }
                }
                "none-sig" => {
                    let request_text = read_request_text(sub)?;
                    let options = replay_options(sub);
                    match attacker.none_signature(token, &request_text, &options).await {
                        Ok(outcome) => print_output::print_none(&outcome, format),
                        Err(err) => print_output::print_error(&err),
                    }
                }
                "kid-traversal" => {
                    let request_text = read_request_text(sub)?;
                    let options = replay_options(sub);
                    match attacker.kid_traversal(token, &request_text, &options).await {
                        Ok(outcome) => print_output::print_kid(&outcome, format),
                        Err(err) => print_output::print_error(&err),
                    }
                }
                "jwk-injection" => match attacker.jwk_injection(token) {
                    Ok(outcome) => print_output::print_forge(&outcome, format),
                    Err(err) => print_output::print_error(&err),
                },
                "algorithm-confusion" => match attacker.algorithm_confusion(token) {
                    Ok(outcome) => print_output::print_forge(&outcome, format),
                    Err(err) => print_output::print_error(&err),
                },
                "brute-force" => {
                    let wordlist = Path::new(sub.value_of("wordlist").unwrap());
                    match attacker.brute_force(token, wordlist) {
                        Ok(outcome) => print_output::print_crack(&outcome, format),
                        Err(err) => print_output::print_error(&err),
                    }
                }
                _ => unreachable!(),
            }
        }
        ("crack", Some(sub)) => {
            let attacker = JwtAttacker::new(HttpReplayer);
            let wordlist = sub.value_of("wordlist").map(Path::new);
            match attacker.quick_crack(sub.value_of("token").unwrap(), wordlist) {
                Ok(secret) => print_output::print_quick_crack(secret.as_deref()),
                Err(err) => print_output::print_error(&err),
            }
        }
        ("common-files", Some(sub)) => {
            let request_text = read_request_text(sub)?;
            let options = replay_options(sub);
            let files: Vec<String> = constants::COMMON_FILES.lines().map(String::from).collect();
            match common_files::scan(&request_text, &options, files) {
                Ok(mut events) => {
                    let mut printed = 0usize;
                    let mut last = None;
                    while let Some(progress) = events.recv().await {
                        for checked in &progress.checked_files[printed..] {
                            print_output::print_checked_file(checked);
                        }
                        printed = progress.checked_files.len();
                        last = Some(progress);
                    }
                    if let Some(progress) = last {
                        print_output::print_scan_summary(&progress);
                    }
                }
                Err(err) => print_output::print_error(&err),
            }
        }
        ("wayback", Some(sub)) => {
            let mut events = wayback::search(sub.value_of("url").unwrap());
            while let Some(event) = events.recv().await {
                match event {
                    WaybackEvent::Progress(text) => print!("{}", text),
                    WaybackEvent::Failed(text) => println!("{}", format!("[!] {}", text).red()),
                    WaybackEvent::Finished(text) => println!("{}", text.green()),
                }
            }
        }
        ("headers", Some(sub)) => {
            let request_text = read_request_text(sub)?;
            let analyzer = HeaderAnalyzer::new()?;
            match analyzer.analyze(&request_text) {
                Ok(report) => {
                    print_output::print_header_report(&report, sub.value_of("format").unwrap())
                }
                Err(err) => print_output::print_error(&err),
            }
        }
        ("clickjack", Some(sub)) => {
            println!("{}", clickjack::generate(sub.value_of("url").unwrap()));
        }
        _ => unreachable!(),
    }

    Ok(())
}

fn request_file_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("request-file")
        .long("request-file")
        .short("r")
        .takes_value(true)
        .help("File containing the raw HTTP request (stdin when omitted)")
}

fn format_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("format")
        .long("format")
        .short("f")
        .takes_value(true)
        .default_value("text")
        .possible_values(&["text", "json"])
        .help("Output format")
}

fn with_request_args<'a, 'b>(sub: App<'a, 'b>) -> App<'a, 'b> {
    sub.arg(request_file_arg())
        .arg(
            Arg::with_name("proxy")
                .long("proxy")
                .short("p")
                .takes_value(true)
                .help("Route outbound requests through this forward proxy"),
        )
        .arg(
            Arg::with_name("insecure")
                .long("insecure")
                .short("k")
                .help("Skip TLS certificate verification"),
        )
}

fn read_request_text(matches: &ArgMatches) -> Result<String, ReplayError> {
    match matches.value_of("request-file") {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => read_stdin(),
    }
}

fn read_stdin() -> Result<String, ReplayError> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn replay_options(matches: &ArgMatches) -> ReplayOptions {
    ReplayOptions {
        use_proxy: matches.is_present("proxy"),
        proxy_address: matches.value_of("proxy").map(String::from),
        verify: !matches.is_present("insecure"),
    }
}
