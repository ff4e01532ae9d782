use owo_colors::OwoColorize;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn is_err_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_err_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_err_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Left-align the first column to its longest entry.
pub fn format_table(rows: &[(&str, &str)]) -> String {
    let width = rows.iter().map(|(w, _)| w.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(w, v)| format!("{w:<width$} {v}\n"))
        .collect()
}

/// `Usage:` line followed by the command table.
pub fn print_usage(program: &str, rows: &[(&str, &str)]) {
    println!("Usage: {program} <command>");
    print!("{}", format_table(rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_aligns_first_column() {
        let out = format_table(&[("init <path>", "a"), ("install", "b")]);
        assert_eq!(out, "init <path> a\ninstall     b\n");
    }

    #[test]
    fn empty_table_prints_nothing() {
        assert_eq!(format_table(&[]), "");
    }
}
