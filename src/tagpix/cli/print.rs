use chrono::{DateTime, Local};
use colored::Colorize;
use std::path::Path;
use tagpix::api::{CmdMessage, MessageLevel};
use tagpix::changelog::ChangeEntry;
use tagpix::config::TagpixConfig;
use tagpix::selector::DisplayPicture;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const DIR_WIDTH: usize = 30;

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

/// One line per picture: index, file name, and the subdirectory it sits in
/// relative to the viewing directory.
pub(super) fn print_pictures(pictures: &[DisplayPicture], view_dir: Option<&Path>) {
    if pictures.is_empty() {
        println!("No pictures found.");
        return;
    }

    let idx_width = pictures.len().to_string().len() + 2;
    for dp in pictures {
        let idx_str = format!("{:>width$}", format!("{}.", dp.index), width = idx_width);

        let location = dp
            .picture
            .dir()
            .strip_prefix(view_dir.unwrap_or(Path::new("")))
            .map(|rel| rel.display().to_string())
            .unwrap_or_else(|_| dp.picture.dir().display().to_string());
        let location = truncate_to_width(&location, DIR_WIDTH);

        let fixed_width = 2 + idx_str.width() + 1 + DIR_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let name = truncate_to_width(&dp.picture.name, available);
        let padding = available.saturating_sub(name.width());

        println!(
            "  {} {}{}{}",
            idx_str.yellow(),
            name,
            " ".repeat(padding),
            format!("{:>width$}", location, width = DIR_WIDTH).dimmed()
        );
    }
}

pub(super) fn print_tags(tags: &[String]) {
    if tags.is_empty() {
        println!("No tags.");
        return;
    }
    for tag in tags {
        println!("  {}", tag.cyan());
    }
}

pub(super) fn print_history(current: &str, history: &[String]) {
    println!("{} {}", "Current:".bold(), current);
    if history.is_empty() {
        println!("No previous names.");
        return;
    }
    for (i, name) in history.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).yellow(), name);
    }
}

pub(super) fn print_log(entries: &[ChangeEntry]) {
    if entries.is_empty() {
        println!("No changes recorded.");
        return;
    }
    for entry in entries {
        let line = format!(
            "{}: {} ---> {}",
            entry.kind.label(),
            entry.before,
            entry.after
        );
        let available = LINE_WIDTH.saturating_sub(TIME_WIDTH);
        let line = truncate_to_width(&line, available);
        let padding = available.saturating_sub(line.width());
        println!(
            "{}{}{}",
            line,
            " ".repeat(padding),
            format_time_ago(entry.timestamp).dimmed()
        );
    }
}

pub(super) fn print_config(config: &TagpixConfig) {
    for key in TagpixConfig::KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

pub(super) fn print_suggestions(suggestions: &[String]) {
    for label in suggestions {
        println!("  {}", label.cyan());
    }
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

fn format_time_ago(timestamp: DateTime<Local>) -> String {
    let duration = Local::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_are_untouched() {
        assert_eq!(truncate_to_width("cat @x.jpg", 20), "cat @x.jpg");
    }

    #[test]
    fn long_strings_end_with_ellipsis() {
        let out = truncate_to_width("a very long picture name.jpg", 10);
        assert_eq!(out.width(), 10);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn wide_characters_count_double() {
        let out = truncate_to_width("写真写真写真.jpg", 6);
        assert!(out.width() <= 6);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let s = format_time_ago(Local::now());
        assert_eq!(s.len(), TIME_WIDTH);
    }
}
