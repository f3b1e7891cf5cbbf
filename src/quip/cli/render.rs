use chrono::{DateTime, Utc};
use colored::Colorize;
use quip::api::{CategoryChoice, CmdMessage, MessageLevel, Shown};
use quip::config::QuipConfig;
use quip::model::Quote;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const CATEGORY_WIDTH: usize = 16;
const TIME_WIDTH: usize = 14;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_shown(shown: &Shown) {
    match shown {
        Shown::Quote(quote) => print_quote(quote),
        Shown::NoQuotes(_) => print_no_quotes(),
    }
}

pub(super) fn print_quote(quote: &Quote) {
    println!();
    println!("  {}", format!("\"{}\"", quote.text).bold());
    let mut footer = format!("  [{}]", quote.category).cyan().to_string();
    if let Some(at) = quote.updated_at {
        footer.push_str(&format!("  {}", format_time_ago(at).trim_start().dimmed()));
    }
    println!("{}", footer);
    println!();
}

pub(super) fn print_no_quotes() {
    println!("{}", "No quotes found for this category.".yellow());
    println!(
        "{}",
        "Please add more quotes or select 'All' categories.".dimmed()
    );
}

pub(super) fn print_quote_list(quotes: &[Quote]) {
    if quotes.is_empty() {
        println!("No quotes found.");
        return;
    }

    for (i, quote) in quotes.iter().enumerate() {
        let idx_str = format!("{:>3}. ", i + 1);
        let time_str = match quote.updated_at {
            Some(at) => format_time_ago(at),
            None => " ".repeat(TIME_WIDTH),
        };

        let fixed_width = idx_str.width() + CATEGORY_WIDTH + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let text = truncate_to_width(&single_line(&quote.text), available);
        let padding = available.saturating_sub(text.width());

        let category = truncate_to_width(&quote.category, CATEGORY_WIDTH);
        let category_padding = CATEGORY_WIDTH.saturating_sub(category.width());

        println!(
            "{}{}{}  {}{}{}",
            idx_str,
            text,
            " ".repeat(padding),
            category.cyan(),
            " ".repeat(category_padding),
            time_str.dimmed()
        );
    }
}

pub(super) fn print_categories(choices: &[CategoryChoice]) {
    for choice in choices {
        if choice.active {
            println!("{} {}", "*".green(), choice.name.green().bold());
        } else {
            println!("  {}", choice.name);
        }
    }
}

pub(super) fn print_config(config: &QuipConfig) {
    for (key, value) in config.entries() {
        println!("{:<16} {}", key.bold(), value);
    }
}

fn single_line(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn long_text_gets_ellipsis_within_width() {
        let out = truncate_to_width("abcdefghij", 6);
        assert_eq!(out, "abcde…");
        assert_eq!(out.width(), 6);
    }

    #[test]
    fn wide_chars_count_double() {
        let out = truncate_to_width("日本語のテキスト", 7);
        assert!(out.width() <= 7);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn newlines_flatten() {
        assert_eq!(single_line("a\nb"), "a b");
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let s = format_time_ago(Utc::now() - chrono::Duration::hours(2));
        assert_eq!(s.width(), TIME_WIDTH);
        assert!(s.ends_with("ago"));
    }
}
