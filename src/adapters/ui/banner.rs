//! Gradient ASCII banner (LEGALLENS).
//! Uses figlet's bundled standard font.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Deep blue (#2563eb).
const LENS_BLUE: (u8, u8, u8) = (0x25, 0x63, 0xeb);
/// Slate (#94a3b8).
const SLATE: (u8, u8, u8) = (0x94, 0xa3, 0xb8);

fn mix_channel(from: u8, to: u8, t: f64) -> u8 {
    let (from, to) = (f64::from(from), f64::from(to));
    (from + (to - from) * t).round() as u8
}

/// Color of banner row `row` out of `rows`, running from blue at the top to slate.
fn row_color(row: usize, rows: usize) -> Color {
    let t = match rows {
        0 | 1 => 1.0,
        n => row as f64 / (n - 1) as f64,
    };
    Color::Rgb {
        r: mix_channel(LENS_BLUE.0, SLATE.0, t),
        g: mix_channel(LENS_BLUE.1, SLATE.1, t),
        b: mix_channel(LENS_BLUE.2, SLATE.2, t),
    }
}

/// Banner lines; falls back to the plain name if the font cannot be loaded.
fn banner_lines() -> Vec<String> {
    let plain = || vec!["LegalLens".to_string()];
    let Ok(font) = FIGfont::standard() else {
        return plain();
    };
    match font.convert("LegalLens") {
        Some(figure) => figure.to_string().lines().map(str::to_string).collect(),
        None => plain(),
    }
}

fn paint(out: &mut impl Write, text: &str, color: Color) {
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(text));
    let _ = out.execute(ResetColor);
}

/// Prints "LegalLens" in ASCII art with a blue-to-slate gradient, then the tagline and version.
pub fn print_welcome() {
    let mut out = stdout();
    let lines = banner_lines();
    let rows = lines.len();
    for (row, line) in lines.iter().enumerate() {
        paint(&mut out, &format!("{}\r\n", line), row_color(row, rows));
    }

    let footer = format!(
        "Intelligent Legal Document Analysis\r\nv{}\r\n",
        env!("CARGO_PKG_VERSION")
    );
    paint(&mut out, &footer, row_color(1, 1));
    let _ = out.flush();
}
