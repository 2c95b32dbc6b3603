use colored::Colorize;
use quotebook::api::{CmdMessage, MessageLevel};
use quotebook::config::{QuotebookConfig, CONFIG_KEYS};
use quotebook::model::Quote;
use std::collections::HashSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const FAVORITE_MARKER: &str = "★";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_quotes(quotes: &[Quote], favorites: &HashSet<u32>) {
    for quote in quotes {
        let marker = if favorites.contains(&quote.id) {
            FAVORITE_MARKER
        } else {
            " "
        };
        let index = format!("{:>4}.", quote.id);
        let byline = format!("—— {}", quote.author);
        let budget = LINE_WIDTH.saturating_sub(index.width() + byline.width() + 4);
        println!(
            "{} {} {}  {}",
            marker.yellow(),
            index.yellow(),
            truncate_to_width(&single_line(&quote.content), budget),
            byline.dimmed()
        );
    }
}

pub(super) fn print_full_quote(quote: &Quote, is_favorite: bool) {
    let marker = if is_favorite { FAVORITE_MARKER } else { "" };
    println!(
        "{} {} {}",
        format!("#{}", quote.id).yellow(),
        format!("[{}]", quote.category).cyan(),
        marker.yellow()
    );
    println!("--------------------------------");
    println!("{}", quote.content.bold());
    println!();
    println!("    {}", attribution(quote).italic());
    if !quote.tags.is_empty() {
        println!("    {}", format_tags(&quote.tags).dimmed());
    }
}

pub(super) fn print_related(quotes: &[Quote], favorites: &HashSet<u32>) {
    if quotes.is_empty() {
        return;
    }
    println!();
    println!("{}", "Related:".bold());
    print_quotes(quotes, favorites);
}

pub(super) fn print_values(values: &[String]) {
    for value in values {
        println!("{}", value);
    }
}

pub(super) fn print_config(config: &QuotebookConfig) {
    for key in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key.cyan(), value);
    }
}

/// `—— author 《source》`, without the source part when it is empty.
pub(super) fn attribution(quote: &Quote) -> String {
    if quote.has_source() {
        format!("—— {} 《{}》", quote.author, quote.source)
    } else {
        format!("—— {}", quote.author)
    }
}

pub(super) fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts `text` to at most `width` terminal columns, ending with "…" when cut.
pub(super) fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
