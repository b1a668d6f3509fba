//! Terminal rendering.
//!
//! Colored lines, result tables, the download bar and the closing box.
//! The bar is drawn with indicatif when stdout is a terminal and as plain
//! lines otherwise.

use std::io::{self, IsTerminal};

use console::{measure_text_width, pad_str, style, Alignment};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use torrential_core::format::readable_time;
use torrential_core::{CandidateRelease, Console, ProgressUpdate, ReleaseVariant, Severity};

const BAR_WIDTH: u64 = 100;
const TITLE_WIDTH: usize = 48;

/// Print the startup banner.
pub fn print_banner() {
    let lines = [
        style("Torrential").cyan().bold().to_string(),
        style("It's raining movies today!!").green().to_string(),
    ];
    println!("{}", boxed(&lines));
}

/// One progress line, e.g. `42.7% | 900.00 MB / 2.1 GB | 3.2 MB/s | ETA: 5m 12s`.
pub fn progress_message(update: &ProgressUpdate) -> String {
    format!(
        "{} | {} / {} | {} | ETA: {}",
        update.percentage, update.downloaded, update.size, update.speed, update.eta
    )
}

fn boxed(lines: &[String]) -> String {
    let width = lines.iter().map(|l| measure_text_width(l)).max().unwrap_or(0);
    let border = "─".repeat(width + 2);

    let mut out = format!("╭{}╮\n", border);
    for line in lines {
        out.push_str(&format!(
            "│ {} │\n",
            pad_str(line, width, Alignment::Left, None)
        ));
    }
    out.push_str(&format!("╰{}╯", border));
    out
}

fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let render = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad_str(cell, *w, Alignment::Left, None).into_owned())
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = vec![style(render(header.iter().map(|h| h.to_string()).collect()))
        .bold()
        .to_string()];
    out.extend(rows.iter().map(|row| render(row.clone())));
    out.join("\n")
}

fn release_rows(first_number: usize, releases: &[CandidateRelease]) -> Vec<Vec<String>> {
    releases
        .iter()
        .enumerate()
        .map(|(i, release)| {
            let qualities = release
                .variants
                .iter()
                .map(|v| v.quality.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                (first_number + i).to_string(),
                pad_str(&release.title, TITLE_WIDTH, Alignment::Left, Some("…")).into_owned(),
                readable_time(release.runtime_minutes as u64 * 60),
                qualities,
            ]
        })
        .collect()
}

fn variant_rows(variants: &[ReleaseVariant]) -> Vec<Vec<String>> {
    variants
        .iter()
        .enumerate()
        .map(|(i, v)| {
            vec![
                (i + 1).to_string(),
                v.quality.clone(),
                v.kind.clone(),
                v.size.clone(),
            ]
        })
        .collect()
}

/// [`Console`] drawing to stdout/stderr.
pub struct TerminalConsole {
    fancy: bool,
    bar: Option<ProgressBar>,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            fancy: io::stdout().is_terminal(),
            bar: None,
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{bar:40.cyan/blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█░ ")
    }

    /// Print above the bar, if one is showing.
    fn emit(&self, line: String, to_stderr: bool) {
        let print = || {
            if to_stderr {
                eprintln!("{}", line);
            } else {
                println!("{}", line);
            }
        };
        match &self.bar {
            Some(bar) if !bar.is_finished() => bar.suspend(print),
            _ => print(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn log(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => self.emit(message.to_string(), false),
            Severity::Warning => self.emit(
                format!(
                    "{}{}",
                    style("WARNING").black().on_yellow(),
                    style(format!(": {}", message)).yellow().bold()
                ),
                false,
            ),
            Severity::Error => self.emit(
                format!(
                    "{}{}",
                    style("ERROR").on_red(),
                    style(format!(": {}", message)).red().bold()
                ),
                true,
            ),
        }
    }

    fn show_releases(&mut self, first_number: usize, releases: &[CandidateRelease]) {
        let rows = release_rows(first_number, releases);
        self.emit(table(&["#", "Movie", "Run-time", "Qualities"], &rows), false);
    }

    fn show_variants(&mut self, release: &CandidateRelease, variants: &[ReleaseVariant]) {
        self.emit(style(&release.title).cyan().bold().to_string(), false);
        self.emit(
            table(&["#", "Quality", "Type", "Size"], &variant_rows(variants)),
            false,
        );
    }

    fn progress_start(&mut self, update: &ProgressUpdate) {
        if !self.fancy {
            println!("{}", progress_message(update));
            return;
        }

        let bar = ProgressBar::with_draw_target(Some(BAR_WIDTH), ProgressDrawTarget::stdout());
        bar.set_style(Self::bar_style());
        bar.set_position(update.percent as u64);
        bar.set_message(progress_message(update));
        self.bar = Some(bar);
    }

    fn progress_update(&mut self, update: &ProgressUpdate) {
        match &self.bar {
            Some(bar) => {
                bar.set_position((update.percent as u64).min(BAR_WIDTH));
                bar.set_message(progress_message(update));
            }
            None => println!("{}", progress_message(update)),
        }
    }

    fn progress_finish(&mut self, update: &ProgressUpdate) {
        match self.bar.take() {
            Some(bar) => {
                bar.set_position(BAR_WIDTH);
                bar.finish_with_message(progress_message(update));
            }
            None => println!("{}", progress_message(update)),
        }
    }

    fn farewell(&mut self, joke: &str) {
        let line = style(joke).cyan().bright().to_string();
        self.emit(boxed(&[line]), false);
    }
}
