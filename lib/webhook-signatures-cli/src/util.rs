use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

#[inline]
pub fn error_kaomoji() -> impl Display {
    "(┬┬﹏┬┬)".if_supports_color(Stream::Stderr, |text| text.red())
}

/// Print a success line to stdout, decorated when the terminal supports it
pub fn report_success(message: &str) {
    let kaomoji = "(^///^)".if_supports_color(Stream::Stdout, |text| text.green());
    let message = message.if_supports_color(Stream::Stdout, |text| text.bold());

    println!("✅ {message} {kaomoji}");
}
