use colored::*;
use serde::Serialize;

use crate::error::ReplayError;
use crate::types::{
    CheckedFile, CommonFilesProgress, CrackOutcome, ForgeOutcome, HeaderReport,
    KidTraversalOutcome, NoneBypassOutcome, TamperOutcome,
};

pub fn print_json<T: Serialize>(value: &T) {
    let json_output = serde_json::to_string_pretty(value).unwrap();
    println!("{}", json_output);
}

pub fn print_error(err: &ReplayError) {
    println!("{} {}", "[!]".red(), err.to_string().red());
}

pub fn print_tokens(tokens: &[String]) {
    if tokens.is_empty() {
        println!("{}", "[-] No JWT tokens found".yellow());
        return;
    }
    for (index, token) in tokens.iter().enumerate() {
        println!("{} JWT #{}: {}", "[+]".green(), index + 1, token.bright_blue());
    }
}

fn print_verdict(success: bool) {
    if success {
        println!("{}", "[!] Attack appears to have worked".green().bold());
    } else {
        println!("{}", "[-] Attack did not produce an accepted response".yellow());
    }
}

pub fn print_tamper(outcome: &TamperOutcome, format: &str) {
    if format == "json" {
        print_json(outcome);
        return;
    }
    print_verdict(outcome.success);
    println!("Detail: {}", outcome.details);
    if let Some(code) = outcome.status_code {
        println!("Status code: {}", code);
    }
    println!("Modified token: {}", outcome.modified_token.bright_blue());
    if let Some(response) = &outcome.response {
        println!("\n{}\n{}", "Response:".cyan().bold(), response);
    }
}

pub fn print_none(outcome: &NoneBypassOutcome, format: &str) {
    if format == "json" {
        print_json(outcome);
        return;
    }
    print_verdict(outcome.success);
    println!("Detail: {}", outcome.details);
    for attempt in &outcome.all_results {
        let status = attempt
            .status_code
            .map(|code| code.to_string())
            .or_else(|| attempt.error.clone())
            .unwrap_or_else(|| "no response".to_string());
        let line = format!("alg = {:<5} -> {}", attempt.variation, status);
        if attempt.success {
            println!("{} {}", "[+]".green(), line.green());
        } else {
            println!("{} {}", "[-]".yellow(), line);
        }
    }
    if let Some(token) = &outcome.modified_token {
        println!("Modified token: {}", token.bright_blue());
    }
    if let Some(response) = &outcome.response {
        println!("\n{}\n{}", "Response:".cyan().bold(), response);
    }
}

pub fn print_kid(outcome: &KidTraversalOutcome, format: &str) {
    if format == "json" {
        print_json(outcome);
        return;
    }
    print_verdict(outcome.success);
    println!("Detail: {}", outcome.details);
    for attempt in &outcome.all_results {
        let status = attempt
            .status_code
            .map(|code| code.to_string())
            .or_else(|| attempt.error.clone())
            .unwrap_or_else(|| "no response".to_string());
        let line = format!("kid = {:<12} -> {}", attempt.path, status);
        if attempt.success {
            println!("{} {}", "[+]".green(), line.green());
        } else {
            println!("{} {}", "[-]".yellow(), line);
        }
    }
    if let Some(token) = &outcome.modified_token {
        println!("Modified token: {}", token.bright_blue());
    }
    if let Some(response) = &outcome.response {
        println!("\n{}\n{}", "Response:".cyan().bold(), response);
    }
}

pub fn print_forge(outcome: &ForgeOutcome, format: &str) {
    if format == "json" {
        print_json(outcome);
        return;
    }
    println!("{} {}", "[+]".green(), outcome.details.green());
    println!("Forged token: {}", outcome.modified_token.bright_blue());
}

pub fn print_crack(outcome: &CrackOutcome, format: &str) {
    if format == "json" {
        print_json(outcome);
        return;
    }
    if let Some(secret) = &outcome.secret {
        println!("{} Found matching secret: {}", "[!]".green(), secret.green());
    } else {
        println!("{} {}", "[-]".yellow(), outcome.details.yellow());
        println!("\n{}", "Tool output:".cyan().bold());
        for line in &outcome.output {
            println!("{}", line);
        }
    }
}

pub fn print_quick_crack(secret: Option<&str>) {
    match secret {
        Some(secret) => {
            println!("{} Found matching secret: {}", "[!]".green(), secret.green())
        }
        None => println!(
            "{}",
            "[-] Could not crack signature with common secrets".yellow()
        ),
    }
}

pub fn print_checked_file(checked: &CheckedFile) {
    if checked.success {
        println!(
            "{} {} ({} bytes)",
            "[+]".green(),
            checked.url.green(),
            checked.response_length.unwrap_or(0)
        );
    } else if let Some(err) = &checked.error {
        println!("{} {} ({})", "[!]".red(), checked.url, err);
    } else {
        println!(
            "[-] {} ({})",
            checked.url,
            checked
                .status_code
                .map(|code| code.to_string())
                .unwrap_or_else(|| "?".to_string())
        );
    }
}

pub fn print_scan_summary(progress: &CommonFilesProgress) {
    println!(
        "\n{}",
        format!(
            "Checked {} of {} files, {} found",
            progress.total_files_checked, progress.total_files, progress.files_found
        )
        .cyan()
        .bold()
    );
    for found in &progress.found_files {
        println!("{} {} ({} bytes)", "[+]".green(), found.url, found.response_length);
    }
}

pub fn print_header_report(report: &HeaderReport, format: &str) {
    if format == "json" {
        print_json(report);
        return;
    }
    println!("{}", "Header Analysis".cyan().bold());
    println!("===============\n");
    for entry in &report.headers {
        let name_value = format!("{}: {}", entry.header, entry.value);
        if entry.is_standard {
            println!("{} {}", "[+]".green(), name_value);
        } else {
            println!("{} {}", "[?]".yellow(), name_value.yellow());
        }
        println!("    {}", entry.description.bright_blue());
    }
    println!(
        "\nTotal: {} ({} request, {} response, {} standard, {} custom)",
        report.total_headers,
        report.request_headers,
        report.response_headers,
        report.standard_headers,
        report.custom_headers
    );
}
