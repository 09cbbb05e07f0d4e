//! The `handwrytten send` command — the star of the CLI.

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::{Map, Value};

use crate::address::{normalize_csv_row, parse_address, Recipient};
use crate::cli::commands::CmdResult;
use crate::cli::{output, CliContext};
use crate::SendOrder;

/// Arguments for `handwrytten send`.
///
/// ```text
/// # Single note
/// handwrytten send --card 123 --font hwDavid \
///     --message "Thanks for your business!" \
///     --to "Jane Doe, 123 Main St, Phoenix AZ 85001"
///
/// # Batch from CSV with personalization
/// handwrytten send --card 123 --font hwDavid \
///     --message "Hi {{firstName}}, thanks for being a customer!" \
///     --csv recipients.csv
///
/// # Message from stdin
/// echo "Thank you!" | handwrytten send --card 123 --font hwDavid \
///     --message - --to "Jane Doe, 123 Main St, Phoenix AZ 85001"
/// ```
#[derive(Args)]
pub struct SendArgs {
    /// Card/stationery id.
    #[arg(long = "card")]
    pub card: u64,

    /// Handwriting font (e.g. "hwDavid").
    #[arg(long = "font")]
    pub font: String,

    /// Message body. Use {{firstName}}, {{lastName}} for personalization.
    /// Pass "-" to read from stdin.
    #[arg(short, long)]
    pub message: Option<String>,

    /// Read the message body from a file.
    #[arg(long)]
    pub message_file: Option<PathBuf>,

    /// Recipient address: "Jane Doe, 123 Main St, Phoenix AZ 85001".
    #[arg(long = "to")]
    pub to: Option<String>,

    /// Return address (same format as --to).
    #[arg(long = "from")]
    pub from: Option<String>,

    /// Send to all recipients in a CSV file.
    #[arg(long = "csv", alias = "from-csv")]
    pub csv: Option<PathBuf>,

    /// Gift card denomination id to include.
    #[arg(long)]
    pub gift_card: Option<u64>,

    /// Insert id to include.
    #[arg(long)]
    pub insert: Option<u64>,

    /// Show what would be sent without actually sending.
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(ctx: &CliContext, args: SendArgs) -> CmdResult {
    let message = resolve_message(args.message.as_deref(), args.message_file.as_deref())?
        .ok_or("A message is required. Use --message, --message-file, or pipe to stdin.")?;

    let recipients = resolve_recipients(args.to.as_deref(), args.csv.as_deref())?;
    if recipients.is_empty() {
        return Err("At least one recipient is required. Use --to or --csv.".into());
    }

    let sender = match &args.from {
        Some(from) => Some(
            parse_address(from).map_err(|e| format!("Cannot parse --from address: {e}"))?,
        ),
        None => None,
    };

    let plural = if recipients.len() == 1 { "" } else { "s" };
    output::info(
        &format!(
            "Sending {} note{plural} using card {}, font {}",
            recipients.len(),
            args.card,
            args.font
        ),
        ctx.quiet,
    );

    if args.dry_run {
        print_dry_run(ctx, &recipients, &message, args.card, &args.font);
        return Ok(());
    }

    let client = ctx.client()?;
    let mut sent = 0_usize;
    let mut failed = 0_usize;
    let mut results: Vec<Value> = Vec::new();

    for (i, recipient) in recipients.iter().enumerate() {
        let personalized = personalize(&message, recipient);
        let mut order = SendOrder::new(args.card, args.font.as_str())
            .message(personalized)
            .recipient(Recipient::from_map(recipient.clone()));
        if let Some(sender) = sender.clone() {
            order = order.sender(sender);
        }
        if let Some(denomination_id) = args.gift_card {
            order = order.denomination_id(denomination_id);
        }
        if let Some(insert_id) = args.insert {
            order = order.insert_id(insert_id);
        }

        // One failure must not abort the rest of the batch.
        match client.orders().send(order).await {
            Ok(result) => {
                sent += 1;
                if !ctx.json {
                    let order_id = result
                        .get("id")
                        .or_else(|| result.get("order_id"))
                        .map_or_else(|| "unknown".to_string(), value_text);
                    output::success(&format!(
                        "[{}/{}] Sent to {} — order {order_id}",
                        i + 1,
                        recipients.len(),
                        recipient_name(recipient),
                    ));
                }
                results.push(result);
            }
            Err(err) => {
                failed += 1;
                output::error(&format!(
                    "[{}/{}] Failed for {}: {err}",
                    i + 1,
                    recipients.len(),
                    recipient_name(recipient),
                ));
            }
        }
    }

    if ctx.json {
        output::print_json(&results);
    } else if !ctx.quiet {
        println!();
        if failed == 0 {
            let plural = if sent == 1 { "" } else { "s" };
            output::success(&format!("All {sent} note{plural} sent successfully!"));
        } else {
            output::warn(&format!(
                "{sent} sent, {failed} failed out of {} total.",
                recipients.len()
            ));
        }
    }

    Ok(())
}

/// Gets the message from `--message`, `--message-file`, or piped stdin.
fn resolve_message(
    message: Option<&str>,
    message_file: Option<&Path>,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if message == Some("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(Some(text.trim().to_string()));
    }
    if let Some(message) = message {
        return Ok(Some(message.to_string()));
    }
    if let Some(path) = message_file {
        return Ok(Some(std::fs::read_to_string(path)?.trim().to_string()));
    }
    if !std::io::stdin().is_terminal() {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        let text = text.trim();
        if !text.is_empty() {
            return Ok(Some(text.to_string()));
        }
    }
    Ok(None)
}

/// Builds the recipient list from `--to` and/or `--csv`.
fn resolve_recipients(
    to: Option<&str>,
    csv: Option<&Path>,
) -> Result<Vec<Map<String, Value>>, Box<dyn std::error::Error>> {
    let mut recipients = Vec::new();

    if let Some(to) = to {
        let address =
            parse_address(to).map_err(|e| format!("Cannot parse --to address: {e}"))?;
        recipients.push(address.to_friendly());
    }

    if let Some(path) = csv {
        let text = std::fs::read_to_string(path)?;
        recipients.extend(parse_csv(&text)?);
    }

    Ok(recipients)
}

const REQUIRED_CSV_FIELDS: [&str; 6] = ["firstName", "lastName", "street1", "city", "state", "zip"];

/// Parses a delimited recipient file: header row plus one recipient per
/// line. The delimiter is auto-detected from the header.
fn parse_csv(text: &str) -> Result<Vec<Map<String, Value>>, Box<dyn std::error::Error>> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let header_line = lines.next().ok_or("CSV file is empty")?;
    let delimiter = detect_delimiter(header_line);
    let headers = split_delimited(header_line, delimiter);

    let mut recipients = Vec::new();
    // Data starts at row 2; the header is row 1.
    for (row_num, line) in lines.enumerate().map(|(i, line)| (i + 2, line)) {
        let cells = split_delimited(line, delimiter);
        let row = normalize_csv_row(
            headers
                .iter()
                .zip(cells.iter())
                .map(|(h, c)| (h.as_str(), c.as_str())),
        );

        for field in REQUIRED_CSV_FIELDS {
            if !row.contains_key(field) {
                return Err(format!("CSV row {row_num}: missing required field '{field}'").into());
            }
        }
        recipients.push(row);
    }

    Ok(recipients)
}

/// Picks the delimiter that splits the header into the most columns.
fn detect_delimiter(header: &str) -> char {
    [',', ';', '\t']
        .into_iter()
        .max_by_key(|&d| header.matches(d).count())
        .unwrap_or(',')
}

/// Splits one line on the delimiter, honoring double-quoted cells.
fn split_delimited(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                cells.push(current.trim().to_string());
                current = String::new();
            }
            c => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

/// Replaces `{{field}}` placeholders with the recipient's values.
fn personalize(message: &str, recipient: &Map<String, Value>) -> String {
    let mut result = message.to_string();
    for (key, value) in recipient {
        if let Value::String(value) = value {
            result = result.replace(&format!("{{{{{key}}}}}"), value);
        }
    }
    result
}

fn recipient_name(recipient: &Map<String, Value>) -> String {
    let first = recipient.get("firstName").map(value_text).unwrap_or_default();
    let last = recipient.get("lastName").map(value_text).unwrap_or_default();
    format!("{first} {last}").trim().to_string()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn print_dry_run(
    ctx: &CliContext,
    recipients: &[Map<String, Value>],
    message: &str,
    card_id: u64,
    font: &str,
) {
    if ctx.json {
        let data: Vec<Value> = recipients
            .iter()
            .map(|r| {
                serde_json::json!({
                    "card_id": card_id,
                    "font": font,
                    "message": personalize(message, r),
                    "recipient": r,
                })
            })
            .collect();
        output::print_json(&data);
        return;
    }

    println!("\n  DRY RUN — nothing will be sent\n");
    for (i, recipient) in recipients.iter().enumerate() {
        let personalized = personalize(message, recipient);
        println!("  [{}] {}", i + 1, recipient_name(recipient));
        if let Some(street1) = recipient.get("street1") {
            println!("      {}", value_text(street1));
        }
        if let Some(street2) = recipient.get("street2") {
            println!("      {}", value_text(street2));
        }
        println!(
            "      {}, {} {}",
            recipient.get("city").map(value_text).unwrap_or_default(),
            recipient.get("state").map(value_text).unwrap_or_default(),
            recipient.get("zip").map(value_text).unwrap_or_default(),
        );
        let preview: String = personalized.chars().take(80).collect();
        println!("      Message: {preview}");
        if personalized.chars().count() > 80 {
            println!("               ...");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c"), ',');
        assert_eq!(detect_delimiter("a;b;c"), ';');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
        assert_eq!(detect_delimiter("single"), ',');
    }

    #[test]
    fn test_split_delimited_honors_quotes() {
        let cells = split_delimited(r#"Jane,"Doe, Jr.",85001"#, ',');
        assert_eq!(cells, vec!["Jane", "Doe, Jr.", "85001"]);
    }

    #[test]
    fn test_parse_csv_normalizes_headers() {
        let csv = "first_name,last_name,address,city,st,zipcode\n\
                   Jane,Doe,123 Main St,Phoenix,AZ,85001\n";
        let rows = parse_csv(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["firstName"], "Jane");
        assert_eq!(rows[0]["street1"], "123 Main St");
        assert_eq!(rows[0]["zip"], "85001");
    }

    #[test]
    fn test_parse_csv_reports_row_number_for_missing_field() {
        let csv = "first_name,last_name,address,city,st,zipcode\n\
                   Jane,Doe,123 Main St,Phoenix,AZ,85001\n\
                   Bob,,456 Oak Ave,Tempe,AZ,85281\n";
        let error = parse_csv(csv).unwrap_err().to_string();
        assert!(error.contains("row 3"));
        assert!(error.contains("lastName"));
    }

    #[test]
    fn test_personalize_replaces_placeholders() {
        let recipient = serde_json::json!({"firstName": "Jane", "lastName": "Doe"})
            .as_object()
            .unwrap()
            .clone();
        let result = personalize("Hi {{firstName}} {{lastName}}!", &recipient);
        assert_eq!(result, "Hi Jane Doe!");
    }

    #[test]
    fn test_personalize_leaves_unknown_placeholders() {
        let recipient = serde_json::json!({"firstName": "Jane"})
            .as_object()
            .unwrap()
            .clone();
        assert_eq!(personalize("{{nickname}}", &recipient), "{{nickname}}");
    }
}
