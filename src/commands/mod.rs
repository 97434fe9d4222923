pub mod config;
pub mod new;
pub mod parse;
pub mod watch;

/// Join positional words back into the phrase the user typed.
pub fn phrase(words: &[String]) -> String {
    words.join(" ")
}
