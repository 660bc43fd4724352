use crate::terminal::colors;
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

/// Events on this target are written verbatim, without a level symbol.
pub const PRINT_TARGET: &str = "portscout::print";

const TREE_KEY_WIDTH: usize = 9;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

/// `fill` repeated on both sides of `label` up to [`TOTAL_WIDTH`] columns.
fn rule(label: ColoredString, label_width: usize, fill: &str) -> String {
    let free: usize = TOTAL_WIDTH.saturating_sub(label_width);
    let left: String = fill.repeat(free / 2);
    let right: String = fill.repeat(free - free / 2);
    format!(
        "{}{}{}",
        left.color(colors::SEPARATOR),
        label,
        right.color(colors::SEPARATOR)
    )
}

pub fn banner(q_level: u8) {
    if q_level > 0 {
        return;
    }
    let title: String = format!("⟦ PORTSCOUT v{} ⟧", env!("CARGO_PKG_VERSION"));
    let width: usize = UnicodeWidthStr::width(title.as_str());
    print(&rule(title.bright_green().bold(), width, "═"));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }
    let title: String = format!("⟦ {} ⟧", msg.to_uppercase());
    let width: usize = UnicodeWidthStr::width(title.as_str());
    print(&rule(title.color(colors::PRIMARY), width, "─"));
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string());
}

/// `> key....: value`, with keys padded to `key_width`.
pub fn aligned_line(key: &str, key_width: usize, value: impl Into<ColoredString>) {
    let dots: String = ".".repeat((key_width + 1).saturating_sub(key.len()));
    let line: String = format!(
        "{} {}{}{} {}",
        ">".color(colors::SEPARATOR),
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value.into()
    );
    print(&line);
}

pub fn tree_head(idx: usize, name: &str) {
    let output: String = format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name
    );
    print(&output);
}

pub fn as_tree_one_level(details: Vec<(String, ColoredString)>) {
    let last_idx: usize = details.len().saturating_sub(1);
    for (i, (key, value)) in details.into_iter().enumerate() {
        let branch: &str = if i == last_idx { "└─" } else { "├─" };
        let dots: String = ".".repeat(TREE_KEY_WIDTH.saturating_sub(key.len()));
        print(&format!(
            " {} {}{}{} {}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn centerln(msg: &str) {
    let pad: String = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{pad}{msg}{pad}"));
}

const NO_RESULTS_ART: &str = r#"
         _   _  ___     ___  ____  _____ _   _
        | \ | |/ _ \   / _ \|  _ \| ____| \ | |
        |  \| | | | | | | | | |_) |  _| |  \| |
        | |\  | |_| | | |_| |  __/| |___| |\  |
        |_| \_|\___/   \___/|_|   |_____|_| \_|
             ____   ___  ____ _____ ____
            |  _ \ / _ \|  _ \_   _/ ___|
            | |_) | | | | |_) || | \___ \
            |  __/| |_| |  _ < | |  ___) |
            |_|    \___/|_| \_\|_| |____/
"#;

pub fn no_results() {
    print(&NO_RESULTS_ART.red().bold().to_string());
}

pub fn end_of_program() {
    fat_separator();
}
